pub(crate) mod capture;
pub(crate) mod interp;
pub(crate) mod markers;
pub(crate) mod player;
pub(crate) mod recorder;
pub(crate) mod state;
