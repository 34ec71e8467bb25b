//! [`Console`] renderer of the [`Service`] state.
//!
//! [`Service`]: service::Service

use std::io::{self, Write};

use service::{
    domain::Residence,
    notification::{Level, Scheduler},
    validation::FormErrors,
    Carousel,
};

/// Renderer of residences, validation errors and notifications into a text
/// output.
#[derive(Debug)]
pub struct Console<W> {
    /// Output to render into.
    out: W,

    /// Base URL to resolve stored images against.
    base_url: String,
}

impl<W: Write> Console<W> {
    /// Creates a new [`Console`] rendering into the provided output.
    pub fn new(out: W, base_url: impl Into<String>) -> Self {
        Self {
            out,
            base_url: base_url.into(),
        }
    }

    /// Returns the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Renders a line per [`Residence`], along with the image under its
    /// [`Carousel`] cursor.
    ///
    /// Soft-deleted [`Residence`]s are skipped unless `all` is requested.
    ///
    /// # Errors
    ///
    /// If writing into the output fails.
    pub fn list(
        &mut self,
        residences: &[Residence],
        carousel: &Carousel,
        all: bool,
    ) -> io::Result<()> {
        let shown = residences.iter().filter(|r| all || !r.is_deleted());
        let mut count = 0;
        for r in shown {
            count += 1;
            write!(
                self.out,
                "#{} {} | {} | {}",
                r.id,
                r.name,
                r.base_price,
                r.address.as_deref().unwrap_or("-"),
            )?;
            if r.is_deleted() {
                write!(self.out, " | supprimée")?;
            }
            if let Some(image) = carousel.current_image(r.id) {
                write!(self.out, " | {}", image.resolve(&self.base_url))?;
            }
            writeln!(self.out)?;
        }
        if count == 0 {
            writeln!(self.out, "Aucune résidence")?;
        }
        Ok(())
    }

    /// Renders every detail of the provided [`Residence`].
    ///
    /// # Errors
    ///
    /// If writing into the output fails.
    pub fn residence(&mut self, r: &Residence) -> io::Result<()> {
        writeln!(self.out, "#{} {}", r.id, r.name)?;
        writeln!(self.out, "  description: {}", r.description)?;
        writeln!(self.out, "  prix de base: {}", r.base_price)?;
        if let Some(address) = &r.address {
            writeln!(self.out, "  adresse: {address}")?;
        }
        if !r.telephone.is_empty() {
            writeln!(self.out, "  téléphone: {}", r.telephone)?;
        }
        if !r.email.is_empty() {
            writeln!(self.out, "  email: {}", r.email)?;
        }
        if let Some(l) = r.localisation {
            writeln!(self.out, "  localisation: {}, {}", l.latitude, l.longitude)?;
        }
        writeln!(
            self.out,
            "  statut: {}",
            if r.is_deleted() { "supprimée" } else { "active" },
        )?;
        if let Some(created_at) = &r.created_at {
            writeln!(self.out, "  créée le: {created_at}")?;
        }
        if let Some(modified_at) = &r.modified_at {
            writeln!(self.out, "  modifiée le: {modified_at}")?;
        }
        for image in &r.images {
            if image.is_inline() {
                writeln!(self.out, "  image: (intégrée)")?;
            } else {
                writeln!(self.out, "  image: {}", image.resolve(&self.base_url))?;
            }
        }
        Ok(())
    }

    /// Renders a line per offending field of the provided [`FormErrors`].
    ///
    /// # Errors
    ///
    /// If writing into the output fails.
    pub fn form_errors(&mut self, errors: &FormErrors) -> io::Result<()> {
        for (field, message) in errors.iter() {
            writeln!(self.out, "  {field}: {message}")?;
        }
        Ok(())
    }

    /// Renders the pending notification of the provided [`Scheduler`], once
    /// everything before it has been rendered.
    ///
    /// # Errors
    ///
    /// If writing into the output fails.
    pub fn notification(&mut self, scheduler: &Scheduler) -> io::Result<()> {
        self.out.flush()?;
        let generation = scheduler.toast().generation();
        _ = scheduler.commit(generation);

        let toast = scheduler.toast();
        if let Some(n) = toast.shown() {
            let mark = match n.level {
                Level::Success => "✔",
                Level::Failure => "✘",
            };
            writeln!(self.out, "{mark} {}", n.message)?;
            scheduler.dismiss();
        }
        Ok(())
    }
}
