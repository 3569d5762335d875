/**
This module turns an annotated text into an `Annotation`: the whitespace-split tokens of the text
and the groups of token indices marked by the annotator with a pair of brackets.
*/
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::Display,
    mem::take,
    ops::Deref,
};
use tracing::{debug, warn};

/// Characters removed from the end of a token before looking for the closing bracket, e.g. the
/// full stop in `[Lisa].`.
const TRAILING_PUNCTUATION: [char; 10] = [',', '.', ';', ':', '-', '?', '!', '\'', '"', ')'];

/// Error returned when we try to extract markables out of an empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputError;

impl Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot extract markables from an empty text. The text must contain at least one token"
        )
    }
}

impl Error for InputError {}

/// Opening and closing delimiters used by an annotator to mark a markable. Defaults to `[` and
/// `]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Brackets {
    opening: String,
    closing: String,
}

impl Brackets {
    pub fn new<O: Into<String>, C: Into<String>>(opening: O, closing: C) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
        }
    }
    pub fn opening(&self) -> &str {
        &self.opening
    }
    pub fn closing(&self) -> &str {
        &self.closing
    }
    fn opens(&self, token: &str) -> bool {
        token.starts_with(self.opening.as_str())
    }
    /// A token closes a markable if it ends with the closing bracket once the trailing
    /// punctuation is removed. Characters of the closing bracket itself are never stripped.
    fn closes(&self, token: &str) -> bool {
        let stripped = token
            .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) && !self.closing.contains(c));
        stripped.ends_with(self.closing.as_str())
    }
}

impl Default for Brackets {
    fn default() -> Self {
        Self::new("[", "]")
    }
}

impl Display for Brackets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.opening, self.closing)
    }
}

/// Ordered token indices of a single markable, or the single index of a token left outside of
/// any markable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Group(Vec<usize>);

impl Group {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }
    pub fn first_index(&self) -> Option<usize> {
        self.0.first().copied()
    }
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Group {
    type Target = [usize];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[usize]> for Group {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Group {
    fn from(value: Vec<usize>) -> Self {
        Self(value)
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// Where the scan currently is relative to the brackets. The group being built lives inside the
/// `Inside` variant.
#[derive(Debug, Default, PartialEq)]
enum ScanState {
    #[default]
    Outside,
    Inside(Vec<usize>),
}

/// Annotated text, split into tokens and grouped into markables. An `Annotation` is immutable
/// once extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<'a> {
    tokens: Vec<&'a str>,
    brackets: Brackets,
    annotated_indices: AHashSet<usize>,
    annotated_groups: Vec<Group>,
    singleton_groups: Vec<Group>,
}

impl<'a> Annotation<'a> {
    /// Splits the `text` on whitespaces and groups the tokens found between the `brackets`.
    ///
    /// A markable that is opened but never closed keeps its indices in the
    /// `annotated_indices`, but it is not part of the `annotated_groups`. Brackets can not be
    /// nested: an opening bracket found inside of a markable is part of the current markable.
    pub fn extract(text: &'a str, brackets: Brackets) -> Result<Self, InputError> {
        let tokens: Vec<&'a str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(InputError);
        }
        let mut annotated_indices = AHashSet::with_capacity(tokens.len());
        let mut annotated_groups = Vec::new();
        let mut singleton_groups = Vec::new();
        let mut state = ScanState::Outside;
        for (index, token) in tokens.iter().enumerate() {
            state = match take(&mut state) {
                ScanState::Outside if brackets.opens(token) => ScanState::Inside(vec![index]),
                ScanState::Outside => {
                    singleton_groups.push(Group(vec![index]));
                    ScanState::Outside
                }
                ScanState::Inside(mut group) => {
                    group.push(index);
                    ScanState::Inside(group)
                }
            };
            // The token opening a markable can also close it.
            if matches!(state, ScanState::Inside(_)) {
                annotated_indices.insert(index);
                if brackets.closes(token) {
                    if let ScanState::Inside(group) = take(&mut state) {
                        annotated_groups.push(Group(group));
                    }
                }
            }
        }
        if let ScanState::Inside(dangling) = state {
            warn!(
                "Markable starting at token {} is never closed by `{}`",
                dangling.first().copied().unwrap_or_default(),
                brackets.closing()
            );
        }
        debug!(
            "Extracted {} markables and {} unannotated tokens out of {} tokens",
            annotated_groups.len(),
            singleton_groups.len(),
            tokens.len()
        );
        Ok(Self {
            tokens,
            brackets,
            annotated_indices,
            annotated_groups,
            singleton_groups,
        })
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }
    /// Number of tokens in the text.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }
    /// Always false for an extracted annotation.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
    pub fn brackets(&self) -> &Brackets {
        &self.brackets
    }
    /// Indices of every token found inside brackets, including the ones of a markable that was
    /// never closed.
    pub fn annotated_indices(&self) -> &AHashSet<usize> {
        &self.annotated_indices
    }
    /// One group per closed markable, in order of appearance.
    pub fn annotated_groups(&self) -> &[Group] {
        &self.annotated_groups
    }
    /// One single-index group per token found outside of the brackets.
    pub fn singleton_groups(&self) -> &[Group] {
        &self.singleton_groups
    }
    /// Surface text of every markable, with its brackets.
    pub fn markables(&self) -> Vec<String> {
        self.annotated_groups
            .iter()
            .map(|group| group.iter().map(|&i| self.tokens[i]).join(" "))
            .collect()
    }
}

/// Extracts an `Annotation` out of `text` with the given `opening` and `closing` brackets.
pub fn extract<'a>(text: &'a str, opening: &str, closing: &str) -> Result<Annotation<'a>, InputError> {
    Annotation::extract(text, Brackets::new(opening, closing))
}
