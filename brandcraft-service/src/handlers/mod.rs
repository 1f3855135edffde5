pub mod assistant;
pub mod content;
pub mod health;
pub mod logo;
pub mod naming;
pub mod sentiment;

pub use assistant::assistant_chat;
pub use content::generate_content;
pub use health::{health_check, metrics};
pub use logo::generate_logo;
pub use naming::generate_brand_names;
pub use sentiment::analyze_sentiment;
