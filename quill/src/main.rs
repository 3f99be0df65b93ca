use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use herald::error;
use herald::config::Config;
use herald::error::{Result, Chainable};
use herald::templating::minijinja::MiniJinjaEngine;
use tracing_subscriber::EnvFilter;

use crate::discover::Quill;

mod discover;
mod render;

pub const CONFIG_FILE: &str = "quill.toml";
pub const LAYOUT: &str = "page.html";

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Builds documentation sites from markdown with template macros.
        cmd quill {
            /// Configuration file [default: ./quill.toml]
            optional -c, --config config: PathBuf

            /// Renders every page and copies every asset into OUTPUT.
            cmd build {
                required output: PathBuf
            }

            /// Renders one page, relative to the docs directory, to stdout.
            cmd render {
                required page: PathBuf
            }
        }
    }
}

fn run(flags: flags::Quill) -> Result<()> {
    let config_path = flags.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = Config::read(&config_path)?;
    let quill = Quill::new::<MiniJinjaEngine>(config)?;

    match flags.subcommand {
        flags::QuillCmd::Build(build) => {
            let start = Instant::now();
            let docs = quill.discover()?;
            tracing::info!(docs = docs.len(), "discovery time: {}ms", start.elapsed().as_millis());

            let render = Instant::now();
            quill.render_site(&docs, &build.output)?;
            tracing::info!("render time: {}ms", render.elapsed().as_millis());
            tracing::info!(output = %build.output.display(), "total time: {}ms", start.elapsed().as_millis());
        }
        flags::QuillCmd::Render(render) => {
            let html = quill.render_page(&quill.doc(&render.page)?)?;
            std::io::stdout().lock()
                .write_all(html.as_bytes())
                .chain(error!("failed to write page to stdout"))?;
        }
    }

    Ok(())
}

pub fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quill=info,herald=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(flags::Quill::from_env_or_exit()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
