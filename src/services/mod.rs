pub mod ingestion;
pub mod recommendation;
pub mod rules;

pub use ingestion::IngestionService;
pub use recommendation::RecommendationService;
