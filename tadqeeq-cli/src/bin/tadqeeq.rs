use clap::Parser;
use tadqeeq_cli::{init_observability, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_observability(cli.json);

    let output = run(&cli, &mut std::io::stdin().lock())?;
    println!("{output}");
    Ok(())
}
