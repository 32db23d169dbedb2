use anyhow::Result;

mod app;

fn main() -> Result<()> {
    let args = archive_file::cli::parse();
    app::run(args)
}
