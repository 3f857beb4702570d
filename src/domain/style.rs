//! Presentation attributes attached to projections.
//!
//! Builders never emit markup. They tag their output with these attributes and leave the final
//! format to the rendering collaborator.

use std::fmt;

use crate::domain::element::LangElement;

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Upper-case `RRGGBB` without the leading `#`.
    pub fn rrggbb(self) -> String {
        format!("{:06X}", self.0 & 0xFF_FFFF)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.rrggbb())
    }
}

/// Fixed colours of the UML table and class labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    UmlClassName,
    UmlSectionTitle,
    UmlType,
    UmlParams,
    UmlStereotype,
    ClassProcessed,
    /// Classes whose relations were never finished (placeholders).
    ClassUnprocessed,
}

impl Palette {
    pub fn color(self) -> Rgb {
        match self {
            Palette::UmlClassName => Rgb(0xFF0000),
            Palette::UmlSectionTitle => Rgb(0x008000),
            Palette::UmlType => Rgb(0x000080),
            Palette::UmlParams => Rgb(0x008080),
            Palette::UmlStereotype => Rgb(0x808000),
            Palette::ClassProcessed => Rgb(0x000000),
            Palette::ClassUnprocessed => Rgb(0x585858),
        }
    }

    /// Label colour of a class depending on whether its relations were processed.
    pub fn for_class(processed: bool) -> Self {
        if processed {
            Palette::ClassProcessed
        } else {
            Palette::ClassUnprocessed
        }
    }
}

/// Text style: bold marks abstract elements, underline marks static ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub underline: bool,
    pub color: Option<Rgb>,
}

impl TextStyle {
    pub fn for_element(element: &LangElement) -> Self {
        Self {
            bold: element.is_abstract(),
            underline: element.is_static(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// A piece of text with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    pub style: TextStyle,
}

impl StyledText {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_formats_with_leading_zeros() {
        assert_eq!(Rgb(0x008080).rrggbb(), "008080");
        assert_eq!(Rgb(0xA90000).to_string(), "#A90000");
        assert_eq!(Rgb::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_unprocessed_classes_use_grey() {
        assert_eq!(Palette::for_class(false).color(), Rgb(0x585858));
        assert_eq!(Palette::for_class(true).color(), Rgb::BLACK);
    }
}
