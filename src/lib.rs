pub mod apps;
pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod event_loop;
pub mod keybindings;
pub mod runner;
pub mod shell;
pub mod state;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
