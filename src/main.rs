//! Writes the carbon emissions and GDP decoupling talk to
//! `Carbon_GDP_Presentation.pptx` in the working directory.
//!
//! Pictures `image1.png`, `image2.png` and `image3.png` are picked up from the
//! working directory when present. Set `RUST_LOG=debug` for assembly details.

use env_logger::{Builder, Env, Target};
use log::{Level, debug, error, info, log_enabled};
use slidepack::DeckBuilder;
use slidepack::deck::{DECK_TITLE, OUTPUT_FILE, carbon_gdp_slides};
use slidepack::ooxml::pptx::PresentationSummary;
use std::io::Write;
use std::process::ExitCode;

fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        })
        .init();
}

fn run() -> slidepack::Result<()> {
    let mut builder = DeckBuilder::new().with_title(DECK_TITLE);
    builder.build_all(&carbon_gdp_slides());

    let skipped = builder.skipped_images().len();
    let path = builder.finalize(OUTPUT_FILE)?;
    info!("Saved presentation to {}", path.display());

    if log_enabled!(Level::Debug) {
        let summary = PresentationSummary::open(&path)?;
        for (index, slide) in summary.slides.iter().enumerate() {
            debug!(
                "slide {}: {} text boxes, {} pictures, notes: {}",
                index + 1,
                slide.text_boxes.len(),
                slide.pictures.len(),
                slide.notes.is_some()
            );
        }
        debug!("{} images skipped", skipped);
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("failed to write {}: {}", OUTPUT_FILE, err);
            ExitCode::FAILURE
        },
    }
}
