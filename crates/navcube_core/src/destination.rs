//! Navigation destinations encoded by the face colors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Face, Rgb};

/// Page that a face of the cube navigates to.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Understanding the people involved.
    Empathize,
    /// Stating the problem.
    Define,
    /// Generating ideas.
    Ideate,
    /// Building something to try.
    Prototype,
    /// Trying it out.
    Test,
    /// Landing page. Does not trigger a scramble.
    Home,
}
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
impl Destination {
    /// All destinations, in phase order.
    pub const ALL: [Destination; 6] = [
        Destination::Empathize,
        Destination::Define,
        Destination::Ideate,
        Destination::Prototype,
        Destination::Test,
        Destination::Home,
    ];

    /// Returns the destination for a sticker tagged with `face`.
    pub fn from_face(face: Face) -> Self {
        match face {
            Face::U => Destination::Empathize,
            Face::L => Destination::Define,
            Face::F => Destination::Ideate,
            Face::R => Destination::Prototype,
            Face::D => Destination::Test,
            Face::B => Destination::Home,
        }
    }
    /// Returns the face whose stickers lead to this destination.
    pub fn face(self) -> Face {
        match self {
            Destination::Empathize => Face::U,
            Destination::Define => Face::L,
            Destination::Ideate => Face::F,
            Destination::Prototype => Face::R,
            Destination::Test => Face::D,
            Destination::Home => Face::B,
        }
    }
    /// Returns the index of the phase, starting from 0.
    pub fn index(self) -> usize {
        self as usize
    }
    /// Returns the text drawn on the face.
    pub fn label(self) -> &'static str {
        match self {
            Destination::Empathize => "EMPATIA",
            Destination::Define => "DEFINIZIONE",
            Destination::Ideate => "IDEAZIONE",
            Destination::Prototype => "PROTOTIPAZIONE",
            Destination::Test => "TEST",
            Destination::Home => "HOME",
        }
    }
    /// Returns whether selecting this destination plays the scramble and
    /// solve choreography.
    pub fn scrambles(self) -> bool {
        self != Destination::Home
    }
}

/// Returns the default sticker color for a face.
pub fn default_face_color(face: Face) -> Rgb {
    match face {
        Face::U => Rgb::from_u32(0x00B5D8),
        Face::D => Rgb::from_u32(0x9C27B0),
        Face::L => Rgb::from_u32(0xE91E63),
        Face::R => Rgb::from_u32(0xFF6D00),
        Face::F => Rgb::from_u32(0xFFC107),
        Face::B => Rgb::from_u32(0xFF0000),
    }
}
