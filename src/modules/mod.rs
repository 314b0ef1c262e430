// Module exports for pure logic
pub mod navigation;          // URL normalization
pub mod notice;
pub mod panels;              // Panel records and list logic
pub mod panel_store;         // Persistence layer
pub mod panel_navigator;     // Multi-panel view state machine
pub mod single_url;
pub mod single_navigator;    // Setup/browse state machine
pub mod surface;
