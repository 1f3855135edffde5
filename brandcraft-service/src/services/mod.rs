pub mod brand_writer;
pub mod json_extract;
pub mod logo;
pub mod metrics;
pub mod providers;
pub mod sentiment;

pub use brand_writer::BrandWriter;
pub use logo::LogoGenerator;
pub use sentiment::{RemoteNlu, SentimentAnalyzer};
