pub mod commands;
pub mod context;
pub mod error_fmt;
pub mod layout;
pub mod render;
pub mod site;

// Re-export commonly used types from context module for convenience
pub use context::{
    parse_sprint_id, ConfigurationError, DetailLookup, Epic, LoadError, Milestone, Phase, SettingsError,
    SprintDetail, SprintDetails, SprintSpan, Timeline, TimelineConfig, TimelineContext, TimelineSource,
};

// Re-export the layout engine for the binary and library users
pub use layout::{
    compute_epic_grid_span, compute_layout, compute_milestone_position, compute_sprint_dates,
    validate_timeline_config, GridGeometry, GridSpan, SprintDateInfo, TimelineLayout,
};
