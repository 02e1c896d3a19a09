//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that must run inside
//! a caller-owned transaction take `&mut PgConnection` instead.

pub mod blog_post_repo;
pub mod campaign_repo;
pub mod investment_repo;
pub mod milestone_repo;
pub mod nft_mint_repo;
pub mod predefined_milestone_repo;
pub mod profile_repo;
pub mod startup_repo;
pub mod stats_repo;
pub mod user_repo;

pub use blog_post_repo::BlogPostRepo;
pub use campaign_repo::CampaignRepo;
pub use investment_repo::InvestmentRepo;
pub use milestone_repo::MilestoneRepo;
pub use nft_mint_repo::NftMintRepo;
pub use predefined_milestone_repo::PredefinedMilestoneRepo;
pub use profile_repo::ProfileRepo;
pub use startup_repo::StartupRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
