//! Basic usage example for sqlstmt
//!
//! Run with: cargo run --example basic -p sqlstmt

use sqlstmt::prelude::*;

fn print_statement(label: &str, stmt: &mut impl Statement) -> BuildResult<()> {
    println!("=== {label} ===");
    println!("{}", stmt.sql()?);
    let params = serde_json::to_string(stmt.parameters()?).unwrap_or_default();
    println!("params: {params}\n");
    Ok(())
}

fn main() -> BuildResult<()> {
    // ============================================
    // SELECT with nested conditions
    // ============================================
    let mut q = select()
        .columns(["id", "name", "age"])
        .from("users")
        .where_(Condition::eq("id", 1))
        .or_where(Condition::eq("id", 3))
        .and_where(Condition::gt("age", 18))
        .order_by("age DESC")
        .limit(10);
    print_statement("select", &mut q)?;

    // ============================================
    // COUNT
    // ============================================
    let mut q = count()
        .from("users")
        .where_(Condition::in_list("status", vec!["active", "pending"]));
    print_statement("count", &mut q)?;

    // ============================================
    // INSERT of several rows
    // ============================================
    let mut q = insert("users").values([
        row! { "name" => "alice", "active" => true },
        row! { "name" => "bob", "active" => false },
    ]);
    print_statement("insert", &mut q)?;

    // ============================================
    // UPDATE with a raw expression
    // ============================================
    let mut q = update("users")
        .set_value("active", false)
        .set_value("updated_at", raw("NOW()"))
        .where_(Condition::between("age", 13, 17));
    print_statement("update", &mut q)?;

    // ============================================
    // DELETE
    // ============================================
    let mut q = delete("sessions").where_(Condition::lt("expires_at", raw("NOW()")));
    print_statement("delete", &mut q)?;

    // Invalid configuration surfaces as an error, never as partial SQL.
    match select().to_sql() {
        Ok(sql) => println!("unexpected: {sql}"),
        Err(err) => println!("error: {err}"),
    }

    Ok(())
}
