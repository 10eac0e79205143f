//! JSON-RPC 2.0 communication layer for the hosting web page.
//!
//! Implements bidirectional messaging between Bevy and the hosting page via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Page (Parent Window)   <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Adding New RPC Methods
//!
//! Add an arm to `dispatch()`. Parameters are a local `Deserialize` struct
//! read through `parse_params`, which treats a missing `params` as `{}`:
//!
//! ```rust,ignore
//! "set_channel" => {
//!     #[derive(Deserialize)]
//!     struct ChannelParams {
//!         channel: u32,
//!     }
//!     let p: ChannelParams = parse_params(params, "Expected 'channel' parameter")?;
//!     store.set_channel(p.channel);
//!     Ok(channel_value(store))
//! }
//! ```
//!
//! Requests carrying an `id` get a response; messages without one are run
//! as notifications and get none. Camera moves are collected in the
//! context and written as `ViewRequest` events after the batch.
//!
//! From the page:
//!
//! ```typescript
//! canvasFrame.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "set_channel",
//!   params: { channel: 3 },
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the page:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({
//!         "data": "value",
//!         "timestamp": 123456
//!     }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Existing Methods
//!
//! ### State
//! - `get_state`: Full store view (phase, channel, volume, layers, bookmarks)
//! - `get_fps`: Retrieve current frame rate
//!
//! ### TV Control
//! - `toggle_power`, `set_channel`, `next_channel`, `prev_channel`
//! - `enter_channel_digit`: Remote-style progressive channel entry
//! - `volume_up`, `volume_down`, `toggle_mute`
//!
//! ### Scene
//! - `toggle_animation`, `toggle_environment`
//! - `toggle_layer`: Flip one environment layer by its frontend key
//!
//! ### Camera Bookmarks
//! - `save_bookmark`, `rename_bookmark`, `delete_bookmark`, `update_bookmark`
//! - `set_default_bookmark`: Index, or null/-1 to clear
//! - `export_bookmarks`, `import_bookmarks`: JSON document `{ slots, defaultIndex }`
//! - `go_to_view`: `"default"`, `"tv"` or a bookmark index
//!
//! ### Notifications
//! - `store_changed`: Store view after every change
//! - `fps_update`: Frame rate every 0.5 s

/// JSON-RPC 2.0 bidirectional communication system for the hosting page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
