use anyhow::Result;

fn main() -> Result<()> {
    finguide_cli::main_entry()
}
