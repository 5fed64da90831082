//! Prompt synthesis from fixed category lists.
//!
//! Every pipeline run draws one scene, lighting, activity and mood at random
//! and renders them into a single descriptive sentence that drives both the
//! image generator and the caption writer.

use rand::seq::IndexedRandom;

const SCENES: &[&str] = &[
    "a misty mountain valley",
    "a rocky ocean coastline",
    "a dense pine forest",
    "a rolling lavender field",
    "a quiet desert canyon",
    "a frozen alpine lake",
    "a winding coastal road",
    "an old-growth redwood grove",
];

const LIGHTING: &[&str] = &[
    "golden hour",
    "sunrise",
    "blue hour",
    "a starry night",
    "soft overcast light",
    "dramatic storm light",
];

const ACTIVITIES: &[&str] = &[
    "a lone hiker crossing a ridge",
    "birds taking flight over the water",
    "waves breaking against the rocks",
    "fog drifting between the trees",
    "a campfire glowing in the distance",
    "wild horses grazing",
];

const MOODS: &[&str] = &[
    "serene",
    "dramatic",
    "melancholic",
    "hopeful",
    "mysterious",
    "tranquil",
];

/// The four-field descriptive template instance driving one pipeline run.
///
/// Immutable once synthesized; a retrying run synthesizes a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub scene: String,
    pub lighting: String,
    pub activity: String,
    pub mood: String,
}

impl PromptSpec {
    /// Renders the four fields into the descriptive sentence sent to the
    /// image and text services.
    pub fn render(&self) -> String {
        format!(
            "A photograph of {} during {}, {}, with a {} mood.",
            self.scene, self.lighting, self.activity, self.mood
        )
    }
}

/// The fixed category lists sampled by the synthesizer.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    scenes: Vec<String>,
    lighting: Vec<String>,
    activities: Vec<String>,
    moods: Vec<String>,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new(
            SCENES.iter().map(|s| s.to_string()).collect(),
            LIGHTING.iter().map(|s| s.to_string()).collect(),
            ACTIVITIES.iter().map(|s| s.to_string()).collect(),
            MOODS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl PromptLibrary {
    /// Creates a library from custom category lists.
    ///
    /// # Panics
    ///
    /// Panics if any list is empty; sampling is only defined over non-empty
    /// lists.
    pub fn new(
        scenes: Vec<String>,
        lighting: Vec<String>,
        activities: Vec<String>,
        moods: Vec<String>,
    ) -> Self {
        assert!(
            !scenes.is_empty()
                && !lighting.is_empty()
                && !activities.is_empty()
                && !moods.is_empty(),
            "category lists must be non-empty"
        );
        Self {
            scenes,
            lighting,
            activities,
            moods,
        }
    }

    /// Draws one uniformly-random element from each category list,
    /// independently and with replacement across calls.
    pub fn synthesize(&self) -> PromptSpec {
        let mut rng = rand::rng();
        PromptSpec {
            scene: pick(&mut rng, &self.scenes),
            lighting: pick(&mut rng, &self.lighting),
            activity: pick(&mut rng, &self.activities),
            mood: pick(&mut rng, &self.moods),
        }
    }

    pub fn scenes(&self) -> &[String] {
        &self.scenes
    }

    pub fn lighting(&self) -> &[String] {
        &self.lighting
    }

    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    pub fn moods(&self) -> &[String] {
        &self.moods
    }
}

fn pick(rng: &mut impl rand::Rng, list: &[String]) -> String {
    list.choose(rng)
        .expect("category lists are non-empty")
        .clone()
}
