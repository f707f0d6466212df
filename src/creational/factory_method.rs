//! Factory Method: creators share `scribble` and differ only in which
//! instrument their factory method builds.

use serde::Deserialize;

pub trait WritingInstrument {
    fn operation(&self) -> String;
}

pub struct Pen;
pub struct Pencil;
pub struct Stylus;

impl WritingInstrument for Pen {
    fn operation(&self) -> String {
        "{Pen}".to_string()
    }
}

impl WritingInstrument for Pencil {
    fn operation(&self) -> String {
        "{Pencil}".to_string()
    }
}

impl WritingInstrument for Stylus {
    fn operation(&self) -> String {
        "{Stylus}".to_string()
    }
}

pub trait InstrumentCreator {
    fn factory_method(&self) -> Box<dyn WritingInstrument>;

    /// Core logic that works with whatever the factory method returns.
    fn scribble(&self) -> String {
        let product = self.factory_method();
        format!("WritingInstrumentCreator: Scribbling with {}", product.operation())
    }
}

pub struct PenCreator;
pub struct PencilCreator;
pub struct StylusCreator;

impl InstrumentCreator for PenCreator {
    fn factory_method(&self) -> Box<dyn WritingInstrument> {
        Box::new(Pen)
    }
}

impl InstrumentCreator for PencilCreator {
    fn factory_method(&self) -> Box<dyn WritingInstrument> {
        Box::new(Pencil)
    }
}

impl InstrumentCreator for StylusCreator {
    fn factory_method(&self) -> Box<dyn WritingInstrument> {
        Box::new(Stylus)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstrumentKind {
    Pen,
    Pencil,
    Stylus,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [Self::Pen, Self::Pencil, Self::Stylus];
}

/// Picks a creator the way an application would from its configuration.
pub fn creator_for(kind: InstrumentKind) -> Box<dyn InstrumentCreator> {
    match kind {
        InstrumentKind::Pen => Box::new(PenCreator),
        InstrumentKind::Pencil => Box::new(PencilCreator),
        InstrumentKind::Stylus => Box::new(StylusCreator),
    }
}
