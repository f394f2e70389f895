//! Scroll-centering elements.
//!
//! `center-me` and `center-me-horizontally` scroll themselves smoothly into
//! view once, on the first animation frame after they connect. They differ
//! only in vertical alignment: `center-me` snaps to the top of the scroll
//! port, `center-me-horizontally` only scrolls vertically when it has to
//! (for carousels and other horizontal scrollers).

/// Scroll animation style.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Alignment of the element within the scroll port along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll only if the element is outside the scroll port.
    Nearest,
}

/// A single scroll-into-view request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScrollRequest {
    pub behavior: ScrollBehavior,
    /// Vertical alignment.
    pub block: Align,
    /// Horizontal alignment.
    pub inline: Align,
}

/// The scroll-centering element variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollCentering {
    /// `center-me`: top of the scroll port, horizontally centered.
    CenterMe,
    /// `center-me-horizontally`: horizontally centered, nearest vertically.
    CenterMeHorizontally,
}

impl ScrollCentering {
    /// Custom element tag name.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::CenterMe => "center-me",
            Self::CenterMeHorizontally => "center-me-horizontally",
        }
    }

    /// Look up a variant by tag name (ASCII case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        [Self::CenterMe, Self::CenterMeHorizontally]
            .into_iter()
            .find(|v| v.tag().eq_ignore_ascii_case(tag))
    }

    /// The scroll this element performs after connecting.
    pub const fn request(self) -> ScrollRequest {
        let block = match self {
            Self::CenterMe => Align::Start,
            Self::CenterMeHorizontally => Align::Nearest,
        };
        ScrollRequest {
            behavior: ScrollBehavior::Smooth,
            block,
            inline: Align::Center,
        }
    }
}
