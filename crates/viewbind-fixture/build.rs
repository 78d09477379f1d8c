fn main() -> Result<(), Box<dyn std::error::Error>> {
    viewbind::build::build!("bindings.json");

    Ok(())
}
