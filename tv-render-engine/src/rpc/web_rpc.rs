use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::{ViewRequest, ViewportCamera};
use crate::engine::core::app_state::TvSet;
use crate::engine::store::bookmarks::BookmarkError;
use crate::engine::store::channel_entry::EntryOutcome;
use crate::engine::store::layers::EnvironmentLayer;
use crate::engine::store::{ChannelStore, StoreChanged};
use crate::engine::systems::fps_tracking::smoothed_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(TvSet::Input),
            )
            .add_systems(
                Update,
                (notify_store_changes, send_outgoing_messages)
                    .chain()
                    .after(TvSet::Render),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
                return;
            }
        }
        None => {
            error!("Window object not available");
            return;
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Everything an RPC method may read or change.
struct RpcContext<'a> {
    store: &'a mut ChannelStore,
    camera: &'a ViewportCamera,
    fps: f32,
    now: f64,
    views: Vec<ViewRequest>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut store: ResMut<ChannelStore>,
    camera: Res<ViewportCamera>,
    mut views: EventWriter<ViewRequest>,
    time: Res<Time>,
) {
    if events.is_empty() {
        return;
    }

    let mut ctx = RpcContext {
        store: &mut store,
        camera: &camera,
        fps: smoothed_fps(&diagnostics).unwrap_or(0.0) as f32,
        now: time.elapsed_secs_f64(),
        views: Vec::new(),
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("RPC request: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut ctx) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }

    for view in ctx.views {
        views.write(view);
    }
}

/// Run one request. Notifications (no ID) are executed but not answered.
fn handle_rpc_request(request: &RpcRequest, ctx: &mut RpcContext) -> Option<RpcResponse> {
    let result = dispatch(&request.method, &request.params, ctx);
    if let Err(error) = &result {
        warn!("RPC {} failed: {}", request.method, error.message);
    }

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn dispatch(
    method: &str,
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let store = &mut *ctx.store;

    match method {
        "get_state" => state_value(store),
        "get_fps" => Ok(serde_json::json!({ "fps": ctx.fps })),

        "toggle_power" => {
            store.toggle_power();
            Ok(serde_json::json!({ "success": true, "tvOn": store.tv_on }))
        }
        "set_channel" => {
            #[derive(Deserialize)]
            struct ChannelParams {
                channel: u32,
            }
            let p: ChannelParams = parse_params(params, "Expected 'channel' parameter")?;
            store.set_channel(p.channel);
            Ok(channel_value(store))
        }
        "next_channel" => {
            store.next_channel();
            Ok(channel_value(store))
        }
        "prev_channel" => {
            store.prev_channel();
            Ok(channel_value(store))
        }
        "enter_channel_digit" => {
            #[derive(Deserialize)]
            struct DigitParams {
                digit: u8,
            }
            let p: DigitParams = parse_params(params, "Expected 'digit' parameter")?;
            let outcome = store.enter_channel_digit(p.digit, ctx.now);
            Ok(serde_json::json!({
                "accepted": outcome != EntryOutcome::Ignored,
                "inProgressChannelNumber": store.entry.in_progress(),
                "currentChannel": store.current_channel,
            }))
        }

        "volume_up" => {
            store.volume_up();
            Ok(volume_value(store))
        }
        "volume_down" => {
            store.volume_down();
            Ok(volume_value(store))
        }
        "toggle_mute" => {
            store.toggle_mute();
            Ok(volume_value(store))
        }

        "toggle_animation" => {
            store.toggle_animation();
            Ok(serde_json::json!({ "success": true, "animationPlaying": store.animation_playing }))
        }
        "toggle_layer" => {
            #[derive(Deserialize)]
            struct LayerParams {
                layer: String,
            }
            let p: LayerParams = parse_params(params, "Expected 'layer' parameter")?;
            let layer = EnvironmentLayer::from_key(&p.layer)
                .ok_or_else(|| RpcError::invalid_params(&format!("Unknown layer: {}", p.layer)))?;
            store.toggle_layer(layer);
            Ok(serde_json::json!({ "success": true, "visible": store.layers.is_visible(layer) }))
        }
        "toggle_environment" => {
            store.toggle_environment();
            Ok(serde_json::json!({
                "success": true,
                "envVisible": store.layers.environment_visible(),
            }))
        }

        "save_bookmark" => {
            #[derive(Deserialize)]
            struct SaveParams {
                #[serde(default)]
                name: Option<String>,
            }
            let p: SaveParams = parse_params(params, "Expected optional 'name' parameter")?;
            let name = p
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| store.bookmarks.next_name());
            let index =
                store.save_bookmark(name, ctx.camera.current_position, ctx.camera.current_target);
            Ok(serde_json::json!({ "success": true, "index": index }))
        }
        "rename_bookmark" => {
            #[derive(Deserialize)]
            struct RenameParams {
                index: usize,
                name: String,
            }
            let p: RenameParams = parse_params(params, "Expected 'index' and 'name' parameters")?;
            store.rename_bookmark(p.index, &p.name)?;
            Ok(serde_json::json!({ "success": true }))
        }
        "delete_bookmark" => {
            let p: IndexParams = parse_params(params, "Expected 'index' parameter")?;
            store.delete_bookmark(p.index)?;
            Ok(serde_json::json!({ "success": true }))
        }
        "set_default_bookmark" => {
            #[derive(Deserialize)]
            struct DefaultParams {
                #[serde(default)]
                index: Option<i64>,
            }
            let p: DefaultParams = parse_params(params, "Expected 'index' parameter")?;
            let index = p.index.and_then(|index| usize::try_from(index).ok());
            store.set_default_bookmark(index)?;
            Ok(serde_json::json!({
                "success": true,
                "defaultIndex": store.bookmarks.default_index_raw(),
            }))
        }
        "update_bookmark" => {
            let p: IndexParams = parse_params(params, "Expected 'index' parameter")?;
            store.update_bookmark(p.index, ctx.camera.current_position, ctx.camera.current_target)?;
            Ok(serde_json::json!({ "success": true }))
        }
        "export_bookmarks" => Ok(serde_json::json!({ "json": store.export_bookmarks()? })),
        "import_bookmarks" => {
            #[derive(Deserialize)]
            struct ImportParams {
                json: String,
            }
            let p: ImportParams = parse_params(params, "Expected 'json' parameter")?;
            store.import_bookmarks(&p.json)?;
            Ok(serde_json::json!({ "success": true, "count": store.bookmarks.len() }))
        }

        "go_to_view" => {
            #[derive(Deserialize)]
            struct ViewParams {
                view: serde_json::Value,
            }
            let p: ViewParams = parse_params(params, "Expected 'view' parameter")?;
            let request = match &p.view {
                serde_json::Value::String(key) => ViewRequest::parse(key),
                serde_json::Value::Number(n) => n
                    .as_u64()
                    .and_then(|index| usize::try_from(index).ok())
                    .map(ViewRequest::Bookmark),
                _ => None,
            }
            .ok_or_else(|| {
                RpcError::invalid_params("Expected 'default', 'tv' or a bookmark index")
            })?;

            if let ViewRequest::Bookmark(index) = request {
                if store.bookmarks.get(index).is_none() {
                    return Err(BookmarkError::OutOfRange(index).into());
                }
            }
            ctx.views.push(request);
            Ok(serde_json::json!({ "success": true }))
        }

        _ => Err(RpcError::method_not_found(method)),
    }
}

#[derive(Deserialize)]
struct IndexParams {
    index: usize,
}

/// Deserialize method parameters. A missing `params` counts as `{}`.
fn parse_params<T: serde::de::DeserializeOwned>(
    params: &serde_json::Value,
    expected: &str,
) -> Result<T, RpcError> {
    let params = if params.is_null() {
        serde_json::json!({})
    } else {
        params.clone()
    };
    serde_json::from_value(params).map_err(|_| RpcError::invalid_params(expected))
}

fn state_value(store: &ChannelStore) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(store.view()).map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn channel_value(store: &ChannelStore) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "currentChannel": store.current_channel,
        "noSignal": !store.channels.contains_key(&store.current_channel),
    })
}

fn volume_value(store: &ChannelStore) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "volume": store.volume,
        "isMuted": store.is_muted,
    })
}

/// Publish the latest store state after every change.
fn notify_store_changes(
    mut changes: EventReader<StoreChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(latest) = changes.read().last() else {
        return;
    };
    match serde_json::to_value(latest.current.view()) {
        Ok(state) => rpc_interface.send_notification("store_changed", state),
        Err(e) => error!("Failed to serialize store state: {}", e),
    }
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<BookmarkError> for RpcError {
    fn from(error: BookmarkError) -> Self {
        match error {
            BookmarkError::Storage(_) => Self::internal_error(&error.to_string()),
            _ => Self::invalid_params(&error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(store: &mut ChannelStore, json: &str) -> (Option<RpcResponse>, Vec<ViewRequest>) {
        let camera = ViewportCamera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let mut ctx = RpcContext {
            store,
            camera: &camera,
            fps: 60.0,
            now: 0.0,
            views: Vec::new(),
        };
        let request: RpcRequest = serde_json::from_str(json).unwrap();
        let response = handle_rpc_request(&request, &mut ctx);
        (response, ctx.views)
    }

    fn error_code(response: &Option<RpcResponse>) -> Option<i32> {
        response.as_ref()?.error.as_ref().map(|e| e.code)
    }

    #[test]
    fn unknown_method_is_reported() {
        let mut store = ChannelStore::default();
        let (response, _) = call(&mut store, r#"{"jsonrpc":"2.0","method":"warp","id":1}"#);
        assert_eq!(error_code(&response), Some(-32601));
    }

    #[test]
    fn notifications_run_without_a_reply() {
        let mut store = ChannelStore::default();
        let (response, _) = call(&mut store, r#"{"jsonrpc":"2.0","method":"toggle_power"}"#);
        assert!(response.is_none());
        assert!(store.tv_on);
    }

    #[test]
    fn requests_reply_with_their_id() {
        let mut store = ChannelStore::default();
        let (response, _) = call(
            &mut store,
            r#"{"jsonrpc":"2.0","method":"set_channel","params":{"channel":2},"id":"a"}"#,
        );
        let response = response.unwrap();
        assert_eq!(response.id, Some(serde_json::json!("a")));
        assert_eq!(response.result.unwrap()["currentChannel"], 2);
        assert_eq!(store.current_channel, 2);
    }

    #[test]
    fn bad_params_are_rejected() {
        let mut store = ChannelStore::default();
        let (response, _) = call(
            &mut store,
            r#"{"jsonrpc":"2.0","method":"toggle_layer","params":{"layer":"sofa"},"id":1}"#,
        );
        assert_eq!(error_code(&response), Some(-32602));

        let (response, _) = call(&mut store, r#"{"jsonrpc":"2.0","method":"set_channel","id":2}"#);
        assert_eq!(error_code(&response), Some(-32602));
    }

    #[test]
    fn layer_keys_match_the_frontend() {
        let mut store = ChannelStore::default();
        call(
            &mut store,
            r#"{"jsonrpc":"2.0","method":"toggle_layer","params":{"layer":"guitarStrap"}}"#,
        );
        assert!(store.layers.is_visible(EnvironmentLayer::GuitarStrap));
    }

    #[test]
    fn save_bookmark_defaults_its_name() {
        let mut store = ChannelStore::default();
        call(&mut store, r#"{"jsonrpc":"2.0","method":"save_bookmark"}"#);
        call(
            &mut store,
            r#"{"jsonrpc":"2.0","method":"save_bookmark","params":{"name":"  Sofa "}}"#,
        );
        let names: Vec<_> = store.bookmarks.slots().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["View 1", "Sofa"]);
    }

    #[test]
    fn go_to_view_queues_camera_moves() {
        let mut store = ChannelStore::default();
        let (_, views) = call(
            &mut store,
            r#"{"jsonrpc":"2.0","method":"go_to_view","params":{"view":"tv"}}"#,
        );
        assert_eq!(views, [ViewRequest::Tv]);

        let (response, views) = call(
            &mut store,
            r#"{"jsonrpc":"2.0","method":"go_to_view","params":{"view":0},"id":1}"#,
        );
        assert!(views.is_empty());
        assert_eq!(error_code(&response), Some(-32602));
    }

    #[test]
    fn malformed_import_keeps_bookmarks() {
        let mut store = ChannelStore::default();
        call(&mut store, r#"{"jsonrpc":"2.0","method":"save_bookmark"}"#);
        let (response, _) = call(
            &mut store,
            r#"{"jsonrpc":"2.0","method":"import_bookmarks","params":{"json":"{oops"},"id":1}"#,
        );
        assert_eq!(error_code(&response), Some(-32602));
        assert_eq!(store.bookmarks.len(), 1);
    }

    #[test]
    fn state_uses_frontend_field_names() {
        let mut store = ChannelStore::default();
        let (response, _) = call(&mut store, r#"{"jsonrpc":"2.0","method":"get_state","id":1}"#);
        let state = response.unwrap().result.unwrap();
        assert_eq!(state["phase"], "off");
        assert_eq!(state["tvOn"], false);
        assert_eq!(state["currentChannel"], 1);
    }
}
