//! The portrait studio: what the user has picked and where the current
//! generation stands.
//!
//! Every user action is a transition on [`Studio`], so combinations like
//! "loading with an error showing" cannot be represented.

use crate::{
    encoder,
    error::{user_message, GenerationError, ValidationError},
    models::{GeneratedImage, StudioView, StyleOption, UploadedImage},
    styles,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ImageSelected,
    Generating,
    Success(GeneratedImage),
    Failed(String),
}

/// Everything the generator needs for one attempt.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub attempt: u64,
    pub image: UploadedImage,
    pub style: &'static StyleOption,
}

#[derive(Debug, Clone)]
pub struct Studio {
    image: Option<UploadedImage>,
    style_id: Option<String>,
    phase: Phase,
    attempt: u64,
    // a new portrait arrived while the current attempt was in flight
    superseded: bool,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl Studio {
    pub fn new() -> Self {
        Self { image: None, style_id: None, phase: Phase::Idle, attempt: 0, superseded: false }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    /// Replaces the portrait and clears any previous result or error.
    ///
    /// While a generation is in flight the studio stays in `Generating` and the
    /// trigger stays disabled; the outstanding result is dropped when it lands.
    pub fn select_image(&mut self, image: UploadedImage) -> Result<(), ValidationError> {
        if !encoder::is_supported(&image.mime_type) {
            let err = ValidationError::UnsupportedMimeType(image.mime_type.clone());
            if self.phase != Phase::Generating {
                self.phase = Phase::Failed(err.to_string());
            }
            return Err(err);
        }
        self.image = Some(image);
        if self.phase == Phase::Generating {
            self.superseded = true;
        } else {
            self.phase = Phase::ImageSelected;
        }
        Ok(())
    }

    pub fn select_style(&mut self, style_id: impl Into<String>) {
        self.style_id = Some(style_id.into());
    }

    /// Mirrors the trigger's enabled state.
    pub fn can_generate(&self) -> bool {
        self.image.is_some() && self.style_id.is_some() && self.phase != Phase::Generating
    }

    /// Validates the selection and moves to `Generating`.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, ValidationError> {
        if self.phase == Phase::Generating {
            return Err(ValidationError::AlreadyGenerating);
        }
        let ticket = self.validate();
        match ticket {
            Ok((image, style)) => {
                self.attempt += 1;
                self.phase = Phase::Generating;
                Ok(GenerationTicket { attempt: self.attempt, image, style })
            }
            Err(err) => {
                self.phase = Phase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn validate(&self) -> Result<(UploadedImage, &'static StyleOption), ValidationError> {
        let image = self.image.clone().ok_or(ValidationError::NoImage)?;
        let style_id = self.style_id.as_deref().ok_or(ValidationError::NoStyle)?;
        let style = styles::find(style_id).ok_or_else(|| ValidationError::UnknownStyle(style_id.to_string()))?;
        Ok((image, style))
    }

    /// Records the outcome of `attempt`. Returns `false` if the outcome was
    /// not shown: unknown attempt, or the portrait changed while it ran.
    pub fn complete(&mut self, attempt: u64, outcome: &Result<GeneratedImage, GenerationError>) -> bool {
        if self.phase != Phase::Generating || attempt != self.attempt {
            return false;
        }
        if self.superseded {
            self.superseded = false;
            self.phase = Phase::ImageSelected;
            return false;
        }
        self.phase = match outcome {
            Ok(image) => Phase::Success(image.clone()),
            Err(err) => Phase::Failed(user_message(&err.to_string()).to_string()),
        };
        true
    }

    pub fn view(&self) -> StudioView {
        let style_id = self.style_id.clone();
        match &self.phase {
            Phase::Idle if self.image.is_none() => StudioView::Idle,
            Phase::Idle | Phase::ImageSelected => StudioView::Ready { style_id },
            Phase::Generating => StudioView::Generating { style_id: style_id.unwrap_or_default() },
            Phase::Success(image) => StudioView::Success { style_id, image_url: image.data_uri() },
            Phase::Failed(error) => StudioView::Failed { error: error.clone() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GENERIC_FAILURE_MESSAGE, REFUSAL_MESSAGE};
    use crate::gemini::NO_IMAGE_MESSAGE;
    use pretty_assertions::assert_eq;

    fn jpeg() -> UploadedImage {
        UploadedImage::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]).with_file_name("me.jpg")
    }

    fn png_result() -> GeneratedImage {
        GeneratedImage { mime_type: "image/png".into(), data: "iVBORw0KGgo=".into() }
    }

    #[test]
    fn starts_idle_and_disabled() {
        let studio = Studio::new();
        assert_eq!(studio.phase(), &Phase::Idle);
        assert_eq!(studio.view(), StudioView::Idle);
        assert!(!studio.can_generate());
    }

    #[test]
    fn no_image_is_rejected() {
        let mut studio = Studio::new();
        studio.select_style("pharaoh");
        let err = studio.begin_generation().unwrap_err();
        assert_eq!(err, ValidationError::NoImage);
        assert_eq!(studio.view(), StudioView::Failed { error: "Please upload an image first.".into() });
    }

    #[test]
    fn no_style_is_rejected() {
        let mut studio = Studio::new();
        studio.select_image(jpeg()).unwrap();
        assert_eq!(studio.begin_generation().unwrap_err(), ValidationError::NoStyle);
        assert_eq!(studio.view(), StudioView::Failed { error: "Please select an art style.".into() });
    }

    #[test]
    fn unknown_style_is_rejected() {
        let mut studio = Studio::new();
        studio.select_image(jpeg()).unwrap();
        studio.select_style("sphinx");
        assert_eq!(studio.begin_generation().unwrap_err(), ValidationError::UnknownStyle("sphinx".into()));
    }

    #[test]
    fn unsupported_upload_is_not_kept() {
        let mut studio = Studio::new();
        let err = studio.select_image(UploadedImage::new("image/gif", vec![b'G', b'I', b'F'])).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedMimeType("image/gif".into()));
        assert!(studio.image().is_none());
    }

    #[test]
    fn successful_generation() {
        let mut studio = Studio::new();
        studio.select_image(jpeg()).unwrap();
        studio.select_style("pharaoh");
        assert!(studio.can_generate());

        let ticket = studio.begin_generation().unwrap();
        assert_eq!(ticket.style.id, "pharaoh");
        assert_eq!(ticket.image.mime_type, "image/jpeg");
        assert!(!studio.can_generate());
        assert_eq!(studio.view(), StudioView::Generating { style_id: "pharaoh".into() });
        assert_eq!(studio.begin_generation().unwrap_err(), ValidationError::AlreadyGenerating);

        assert!(studio.complete(ticket.attempt, &Ok(png_result())));
        assert_eq!(
            studio.view(),
            StudioView::Success { style_id: Some("pharaoh".into()), image_url: "data:image/png;base64,iVBORw0KGgo=".into() }
        );
        assert!(studio.can_generate());
    }

    #[test]
    fn refusal_and_transport_failures_read_differently() {
        let mut studio = Studio::new();
        studio.select_image(jpeg()).unwrap();
        studio.select_style("queen");

        let ticket = studio.begin_generation().unwrap();
        studio.complete(ticket.attempt, &Err(GenerationError::ModelRefusal(NO_IMAGE_MESSAGE.into())));
        assert_eq!(studio.phase(), &Phase::Failed(REFUSAL_MESSAGE.into()));

        let ticket = studio.begin_generation().unwrap();
        studio.complete(ticket.attempt, &Err(GenerationError::Transport("connection reset".into())));
        assert_eq!(studio.phase(), &Phase::Failed(GENERIC_FAILURE_MESSAGE.into()));
    }

    #[test]
    fn new_image_clears_result_and_error() {
        let mut studio = Studio::new();
        studio.select_image(jpeg()).unwrap();
        studio.select_style("scribe");
        let ticket = studio.begin_generation().unwrap();
        studio.complete(ticket.attempt, &Ok(png_result()));

        studio.select_image(jpeg()).unwrap();
        assert_eq!(studio.phase(), &Phase::ImageSelected);
        assert_eq!(studio.view(), StudioView::Ready { style_id: Some("scribe".into()) });

        let ticket = studio.begin_generation().unwrap();
        studio.complete(ticket.attempt, &Err(GenerationError::Transport("boom".into())));
        studio.select_image(jpeg()).unwrap();
        assert_eq!(studio.phase(), &Phase::ImageSelected);
    }

    #[test]
    fn new_image_mid_flight_keeps_trigger_disabled() {
        let mut studio = Studio::new();
        studio.select_image(jpeg()).unwrap();
        studio.select_style("pharaoh");
        let first = studio.begin_generation().unwrap();

        // user swaps the portrait before the first reply lands
        studio.select_image(jpeg().with_file_name("other.jpg")).unwrap();
        assert_eq!(studio.phase(), &Phase::Generating);
        assert!(!studio.can_generate());
        assert_eq!(studio.begin_generation().unwrap_err(), ValidationError::AlreadyGenerating);

        // an unsupported pick mid-flight doesn't unlock the trigger either
        assert!(studio.select_image(UploadedImage::new("image/gif", vec![b'G'])).is_err());
        assert_eq!(studio.phase(), &Phase::Generating);

        assert!(!studio.complete(first.attempt, &Ok(png_result())));
        assert_eq!(studio.phase(), &Phase::ImageSelected);
        assert_eq!(studio.image().unwrap().file_name.as_deref(), Some("other.jpg"));
        assert!(studio.can_generate());

        let second = studio.begin_generation().unwrap();
        assert!(!studio.complete(first.attempt, &Ok(png_result())));
        assert!(studio.complete(second.attempt, &Err(GenerationError::Transport("x".into()))));
        assert!(!studio.complete(second.attempt, &Ok(png_result())));
        assert_eq!(studio.phase(), &Phase::Failed(GENERIC_FAILURE_MESSAGE.into()));
    }
}
