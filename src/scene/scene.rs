//! The fixed set of procedural scenes and their page sections.

use std::fmt;

/// Page sections in document order. A section's position in this table is the
/// index of the scene it shows.
pub const SECTION_ORDER: [&str; 6] = [
    "hero",
    "about",
    "experience",
    "projects",
    "skills",
    "contact",
];

/// One of the six procedural background scenes.
///
/// Scenes are plain values: every frame the active one is asked for a fresh
/// [`GeometryBatch`](super::GeometryBatch) via [`generate`](super::generate).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Double helix with rungs and falling code rain.
    #[default]
    Dna,
    /// Fibonacci-sphere neurons with nearest-neighbour synapses.
    Brain,
    /// Sparse trace grid, rotating gears and walking packets.
    Circuit,
    /// Energy core with six orbiting skill cards.
    Orbit,
    /// Nine pulsing stars, their edges and energy beams.
    Constellation,
    /// Twisting ring tunnel with inbound stars.
    Wormhole,
}

impl Scene {
    /// All scenes, ordered by index.
    pub const ALL: [Scene; 6] = [
        Scene::Dna,
        Scene::Brain,
        Scene::Circuit,
        Scene::Orbit,
        Scene::Constellation,
        Scene::Wormhole,
    ];

    /// Position of this scene in [`Scene::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Scene shown while the named section straddles the viewport midpoint.
    pub fn for_section(name: &str) -> Option<Self> {
        SECTION_ORDER
            .iter()
            .position(|section| section.eq_ignore_ascii_case(name))
            .and_then(Self::from_index)
    }

    /// Name of the section that activates this scene.
    pub fn section(self) -> &'static str {
        SECTION_ORDER[self.index()]
    }

    /// Text announced by the HUD when this scene becomes the target.
    pub fn label(self) -> &'static str {
        match self {
            Scene::Dna => "DNA HELIX",
            Scene::Brain => "NEURAL NET",
            Scene::Circuit => "CIRCUIT BOARD",
            Scene::Orbit => "SKILL ORBIT",
            Scene::Constellation => "CONSTELLATION",
            Scene::Wormhole => "WORMHOLE",
        }
    }

    /// Clear color the background drifts towards while this scene is the target.
    pub fn background(self) -> [f32; 3] {
        match self {
            Scene::Dna => [0.020, 0.010, 0.040],
            Scene::Brain => [0.010, 0.020, 0.050],
            Scene::Circuit => [0.000, 0.035, 0.030],
            Scene::Orbit => [0.030, 0.010, 0.030],
            Scene::Constellation => [0.005, 0.010, 0.035],
            Scene::Wormhole => [0.040, 0.005, 0.010],
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
