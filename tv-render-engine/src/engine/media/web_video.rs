use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::render::render_resource::Extent3d;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

use super::{MediaBackend, MediaCommand, MediaError, MediaEvent, MediaEventKind, PlaybackToken};

// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

type EventQueue = Arc<Mutex<Vec<MediaEvent>>>;

/// Hidden `<video>` element plus an offscreen canvas used to read frames
/// back into the Bevy video image.
pub struct WebVideoBackend {
    video: Option<HtmlVideoElement>,
    canvas: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
    token: Arc<Mutex<PlaybackToken>>,
    events: EventQueue,
    blank_pending: bool,
}

impl WebVideoBackend {
    pub fn new() -> Self {
        let token = Arc::new(Mutex::new(PlaybackToken::default()));
        let events: EventQueue = Arc::new(Mutex::new(Vec::new()));

        let video = match create_video_element(&token, &events) {
            Ok(video) => Some(video),
            Err(e) => {
                error!("Failed to create video element: {:?}", e);
                None
            }
        };
        let canvas = match create_readback_canvas() {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                error!("Failed to create frame readback canvas: {:?}", e);
                None
            }
        };

        Self {
            video,
            canvas,
            token,
            events,
            blank_pending: true,
        }
    }

    fn push(&self, token: PlaybackToken, kind: MediaEventKind) {
        push_event(&self.events, token, kind);
    }

    fn play(&self, video: &HtmlVideoElement, token: PlaybackToken) {
        let promise = match video.play() {
            Ok(promise) => promise,
            Err(e) => {
                self.push(
                    token,
                    MediaEventKind::PlayRejected(MediaError::Rejected(format!("{e:?}"))),
                );
                return;
            }
        };

        let events = self.events.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let kind = match JsFuture::from(promise).await {
                Ok(_) => MediaEventKind::PlayResolved,
                Err(e) => MediaEventKind::PlayRejected(MediaError::Rejected(format!("{e:?}"))),
            };
            push_event(&events, token, kind);
        });
    }
}

impl MediaBackend for WebVideoBackend {
    fn apply(&mut self, command: MediaCommand) {
        let Some(video) = self.video.clone() else {
            if let MediaCommand::Play { token } = command {
                self.push(
                    token,
                    MediaEventKind::PlayRejected(MediaError::Rejected("no video element".into())),
                );
            }
            return;
        };

        match command {
            MediaCommand::Load { token, source } => {
                if let Ok(mut current) = self.token.lock() {
                    *current = token;
                }
                // Bevy serves the asset directory under `assets/`.
                video.set_src(&format!("assets/{source}"));
                video.load();
            }
            MediaCommand::Play { token } => self.play(&video, token),
            MediaCommand::Pause => {
                if let Err(e) = video.pause() {
                    warn!("Video pause failed: {:?}", e);
                }
            }
            MediaCommand::Clear => {
                if let Err(e) = video.pause() {
                    warn!("Video pause failed: {:?}", e);
                }
                if let Err(e) = video.remove_attribute("src") {
                    warn!("Clearing video source failed: {:?}", e);
                }
                video.load();
                self.blank_pending = true;
            }
            MediaCommand::SetMuted(muted) => video.set_muted(muted),
            MediaCommand::SetVolume(volume) => video.set_volume(f64::from(volume)),
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        match self.events.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }

    fn has_new_frame(&self) -> bool {
        if self.blank_pending {
            return true;
        }
        self.video
            .as_ref()
            .is_some_and(|video| !video.paused() && video.ready_state() >= HAVE_CURRENT_DATA)
    }

    fn upload_frame(&mut self, image: &mut Image) -> bool {
        if self.blank_pending {
            self.blank_pending = false;
            if let Some(data) = image.data.as_mut() {
                for pixel in data.chunks_exact_mut(4) {
                    pixel.copy_from_slice(&[0, 0, 0, 255]);
                }
                return true;
            }
            return false;
        }

        let (Some(video), Some((canvas, context))) = (&self.video, &self.canvas) else {
            return false;
        };

        let width = video.video_width();
        let height = video.video_height();
        if width == 0 || height == 0 {
            return false;
        }

        if canvas.width() != width || canvas.height() != height {
            canvas.set_width(width);
            canvas.set_height(height);
        }

        if let Err(e) = context.draw_image_with_html_video_element(video, 0.0, 0.0) {
            debug!("Video frame not drawable yet: {:?}", e);
            return false;
        }

        let pixels = match context.get_image_data(0.0, 0.0, width as f64, height as f64) {
            Ok(image_data) => image_data.data(),
            Err(e) => {
                // Cross-origin sources taint the canvas.
                warn!("Video frame readback failed: {:?}", e);
                return false;
            }
        };

        if image.width() != width || image.height() != height {
            image.resize(Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            });
        }

        match image.data.as_mut() {
            Some(data) if data.len() == pixels.len() => {
                data.copy_from_slice(&pixels);
                true
            }
            _ => false,
        }
    }
}

fn push_event(events: &EventQueue, token: PlaybackToken, kind: MediaEventKind) {
    if let Ok(mut queue) = events.lock() {
        queue.push(MediaEvent::new(token, kind));
    }
}

fn create_video_element(
    token: &Arc<Mutex<PlaybackToken>>,
    events: &EventQueue,
) -> Result<HtmlVideoElement, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let video = document
        .create_element("video")?
        .dyn_into::<HtmlVideoElement>()?;
    video.set_cross_origin(Some("anonymous"));
    video.set_loop(false);
    video.set_muted(true);
    video.set_attribute("playsinline", "")?;
    video.style().set_property("display", "none")?;

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&video)?;

    let listeners: [(&str, fn() -> MediaEventKind); 4] = [
        ("ended", || MediaEventKind::Ended),
        ("waiting", || MediaEventKind::Waiting),
        ("playing", || MediaEventKind::Playing),
        ("error", || {
            MediaEventKind::Error(MediaError::SourceUnavailable("video element error".into()))
        }),
    ];

    for (name, kind) in listeners {
        let token = token.clone();
        let events = events.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let current = token.lock().map(|t| *t).unwrap_or_default();
            push_event(&events, current, kind());
        }) as Box<dyn FnMut(web_sys::Event)>);

        video.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        // Listeners live as long as the page.
        closure.forget();
    }

    Ok(video)
}

fn create_readback_canvas() -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    Ok((canvas, context))
}
