//! Display seam for analysis results.
//!
//! The pipeline never writes to the terminal directly. It hands images,
//! galleries, and report lines to a [`Presenter`], which decides how they
//! appear. [`TerminalPresenter`] draws ASCII previews into any
//! [`Write`] sink; tests substitute a recording presenter.

use crate::config::PreviewConfig;
use crate::output;
use crate::types::GrayImage;
use log::warn;
use std::io::{self, Write};

pub trait Presenter {
    /// Show one image under a caption.
    fn show_image(&mut self, image: &GrayImage, title: &str);

    /// Show any number of images together, each under its own caption.
    fn show_gallery(&mut self, images: &[&GrayImage], titles: &[String]);

    /// Show plain text lines.
    fn report(&mut self, lines: &[String]);
}

/// Writes ASCII previews to a text sink.
///
/// Write failures (a closed pipe, for example) are logged and otherwise
/// ignored; presentation never aborts an analysis.
pub struct TerminalPresenter<W: Write> {
    out: W,
    preview: PreviewConfig,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(preview: &PreviewConfig) -> Self {
        Self::new(io::stdout(), preview.clone())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, preview: PreviewConfig) -> Self {
        Self { out, preview }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| writeln!(self.out))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("failed to write preview: {e}");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_image(&mut self, image: &GrayImage, title: &str) {
        let lines = output::render_image(image, title, &self.preview);
        self.emit(&lines);
    }

    fn show_gallery(&mut self, images: &[&GrayImage], titles: &[String]) {
        let lines = output::render_gallery(images, titles, &self.preview);
        self.emit(&lines);
    }

    fn report(&mut self, lines: &[String]) {
        self.emit(lines);
    }
}
