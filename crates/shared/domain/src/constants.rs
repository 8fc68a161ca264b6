//! Shared constants for the word pipeline and the HTTP surface.

/// `OpenAPI` tag for system routes (health, docs).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for game routes.
pub const GAME_TAG: &str = "Game";

/// Upper bound of sequential generate/verify attempts per request.
pub const MAX_GENERATION_ATTEMPTS: u8 = 5;
/// Caller-supplied exclusion entries kept after normalization.
pub const MAX_CALLER_EXCLUSIONS: usize = 50;
/// Excluded words surfaced into the generation prompt.
pub const PROMPT_EXCLUSION_PREVIEW: usize = 20;

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 10;

pub const DEFAULT_HINT: &str = "A uniquely Singaporean word!";
pub const DEFAULT_EMOJI: &str = "🇸🇬";
