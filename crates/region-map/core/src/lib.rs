//! Region map screen logic shared by every front end.
//!
//! `region-map-core` owns the map's state machines (opening, input, region
//! switching, dungeon preview, fly selection and closing) and talks to the
//! outside world through two seams: read-only game data via the oracles
//! bundled in [`env::RegionMapEnv`], and everything visible or audible via
//! [`display::DisplayDriver`]. A front end opens a
//! [`session::RegionMapSession`], feeds it one [`input::InputFrame`] per frame
//! and resumes the returned [`session::Continuation`] when it finishes.
pub mod config;
pub mod cursor;
pub mod display;
pub mod env;
pub mod error;
pub mod icons;
pub mod input;
pub mod marker;
pub mod names;
pub mod overlay;
pub mod palette;
pub mod session;
pub mod types;

pub use config::RegionMapConfig;
pub use cursor::{Cursor, CursorControls, CursorEvent, SnapTargets};
pub use display::{DisplayDriver, VirtualDisplay};
pub use env::{
    DungeonDescriptor, DungeonOracle, FlyDestination, FlyOracle, MapKind, MapLocation,
    MapSectionLookup, OverworldOracle, PlayerAvatar, PreviewAssets, ProgressOracle,
    RegionLayout, RegionMapEnv, SectionMetadata, SectionTable, Span, VisitLog, WarpRequest,
};
pub use error::{DriverFault, ErrorSeverity, RegionMapError, SessionError, TableError};
pub use icons::{RegionIcon, RegionIcons};
pub use input::{Buttons, InputFrame};
pub use marker::PlayerMarker;
pub use overlay::{DungeonPreviewOverlay, Overlay, RegionSwitchMenu, SwitchOutcome};
pub use session::{
    Continuation, FlyChoice, MapScene, Permissions, Phase, PresentationMode, RegionMapSession,
    SessionExit, SessionRequest, SessionStatus,
};
pub use types::{
    Direction, Layer, Position, Region, RegionFilter, ScreenPos, SectionId, SectionType,
};
