//! Topic catalog
//!
//! The default JEE syllabus per subject, merged with topics the user adds.

use crate::error::{AppError, Result};
use crate::models::Subject;
use std::collections::{BTreeMap, BTreeSet};

/// User-added topics per subject
pub type CustomTopics = BTreeMap<Subject, Vec<String>>;

const PHYSICS_TOPICS: &[&str] = &[
    "Units and Dimensions",
    "Vectors",
    "Motion in a Straight Line",
    "Motion in a Plane",
    "Laws of Motion",
    "Friction",
    "Work, Energy and Power",
    "System of Particles and Rotational Motion",
    "Gravitation",
    "Mechanical Properties of Solids",
    "Mechanical Properties of Fluids",
    "Thermal Properties of Matter",
    "Thermodynamics",
    "Kinetic Theory",
    "Oscillations",
    "Waves",
    "Electric Charges and Fields",
    "Electrostatic Potential",
    "Current Electricity",
    "Moving Charges and Magnetism",
    "Magnetism and Matter",
    "Electromagnetic Induction",
    "Alternating Current",
    "Electromagnetic Waves",
    "Ray Optics",
    "Wave Optics",
    "Dual Nature of Radiation",
    "Atoms",
    "Nuclei",
    "Semiconductor Electronics",
];

const CHEMISTRY_TOPICS: &[&str] = &[
    "Mole Concept",
    "Atomic Structure",
    "Periodic Table",
    "Chemical Bonding",
    "States of Matter",
    "Thermodynamics",
    "Equilibrium",
    "Redox Reactions",
    "Hydrogen",
    "s-Block Elements",
    "p-Block Elements",
    "d-Block Elements",
    "f-Block Elements",
    "Coordination Compounds",
    "Environmental Chemistry",
    "Solid State",
    "Solutions",
    "Electrochemistry",
    "Chemical Kinetics",
    "Surface Chemistry",
    "General Principles of Metallurgy",
    "Organic Chemistry Basics",
    "Hydrocarbons",
    "Haloalkanes and Haloarenes",
    "Alcohols Phenols and Ethers",
    "Aldehydes Ketones and Carboxylic Acids",
    "Amines",
    "Biomolecules",
    "Polymers",
    "Chemistry in Everyday Life",
];

const MATHEMATICS_TOPICS: &[&str] = &[
    "Sets",
    "Relations and Functions",
    "Trigonometric Functions",
    "Mathematical Induction",
    "Complex Numbers",
    "Linear Inequalities",
    "Permutations and Combinations",
    "Binomial Theorem",
    "Sequences and Series",
    "Straight Lines",
    "Conic Sections",
    "Introduction to 3D Geometry",
    "Limits and Derivatives",
    "Mathematical Reasoning",
    "Statistics",
    "Probability",
    "Matrices",
    "Determinants",
    "Continuity and Differentiability",
    "Applications of Derivatives",
    "Integrals",
    "Applications of Integrals",
    "Differential Equations",
    "Vector Algebra",
    "Three Dimensional Geometry",
    "Linear Programming",
];

/// Built-in syllabus for a subject
pub fn default_topics(subject: Subject) -> &'static [&'static str] {
    match subject {
        Subject::Physics => PHYSICS_TOPICS,
        Subject::Chemistry => CHEMISTRY_TOPICS,
        Subject::Mathematics => MATHEMATICS_TOPICS,
    }
}

/// A topic hit from [`TopicCatalog::search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMatch {
    pub subject: Subject,
    pub topic: String,
    pub custom: bool,
}

/// Default and custom topics for every subject
#[derive(Debug, Clone, Default)]
pub struct TopicCatalog {
    custom: CustomTopics,
}

impl TopicCatalog {
    pub fn new(custom: CustomTopics) -> Self {
        Self { custom }
    }

    pub fn custom_topics(&self) -> &CustomTopics {
        &self.custom
    }

    /// Default and custom topics for a subject, de-duplicated and sorted
    pub fn topics_for_subject(&self, subject: Subject) -> Vec<String> {
        let merged: BTreeSet<String> = default_topics(subject)
            .iter()
            .map(|t| t.to_string())
            .chain(self.custom_for(subject).iter().cloned())
            .collect();
        merged.into_iter().collect()
    }

    /// Every subject's merged topic list
    pub fn all_topics(&self) -> BTreeMap<Subject, Vec<String>> {
        Subject::ALL
            .iter()
            .map(|&subject| (subject, self.topics_for_subject(subject)))
            .collect()
    }

    /// Whether a topic is absent from the built-in syllabus
    pub fn is_custom_topic(subject: Subject, topic: &str) -> bool {
        !default_topics(subject).contains(&topic)
    }

    /// Add a custom topic
    pub fn add_topic(&mut self, subject: Subject, topic: &str) -> Result<()> {
        let topic = normalize(topic)?;
        if self.topics_for_subject(subject).contains(&topic) {
            return Err(AppError::Validation(format!(
                "Topic already exists in {}: {}",
                subject, topic
            )));
        }
        self.custom.entry(subject).or_default().push(topic);
        Ok(())
    }

    /// Add several custom topics at once, skipping blanks and duplicates.
    /// Returns how many were added.
    pub fn add_topics<I, S>(&mut self, subject: Subject, topics: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        topics
            .into_iter()
            .filter(|topic| self.add_topic(subject, topic.as_ref()).is_ok())
            .count()
    }

    /// Rename a custom topic. Built-in topics cannot be renamed.
    pub fn rename_topic(&mut self, subject: Subject, from: &str, to: &str) -> Result<()> {
        let to = normalize(to)?;
        if from != to && self.topics_for_subject(subject).contains(&to) {
            return Err(AppError::Validation(format!(
                "Topic already exists in {}: {}",
                subject, to
            )));
        }

        let slot = self
            .custom
            .get_mut(&subject)
            .and_then(|topics| topics.iter_mut().find(|t| t.as_str() == from))
            .ok_or_else(|| AppError::Validation(format!("No custom topic named {}", from)))?;
        *slot = to;
        Ok(())
    }

    /// Remove a custom topic. Returns false when it was not a custom topic.
    pub fn remove_topic(&mut self, subject: Subject, topic: &str) -> bool {
        let Some(topics) = self.custom.get_mut(&subject) else {
            return false;
        };
        let before = topics.len();
        topics.retain(|t| t != topic);
        topics.len() != before
    }

    /// Case-insensitive substring search, optionally within one subject
    pub fn search(&self, query: &str, subject: Option<Subject>) -> Vec<TopicMatch> {
        let query = query.to_lowercase();
        let subjects: Vec<Subject> = match subject {
            Some(s) => vec![s],
            None => Subject::ALL.to_vec(),
        };

        subjects
            .into_iter()
            .flat_map(|subject| {
                self.topics_for_subject(subject)
                    .into_iter()
                    .map(move |topic| (subject, topic))
            })
            .filter(|(_, topic)| topic.to_lowercase().contains(&query))
            .map(|(subject, topic)| TopicMatch {
                custom: Self::is_custom_topic(subject, &topic),
                subject,
                topic,
            })
            .collect()
    }

    fn custom_for(&self, subject: Subject) -> &[String] {
        self.custom.get(&subject).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn normalize(topic: &str) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("Topic name is required".into()));
    }
    Ok(topic.to_string())
}
