//! Preview server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::Blog;

/// Endpoint the injected script connects to
const LIVE_RELOAD_PATH: &str = "/__livereload";

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket((location.protocol === 'https:' ? 'wss://' : 'ws://') + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    /// Path prefix the site is served under, without the trailing slash
    prefix: String,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: blog.public_dir.clone(),
        prefix: blog.config.prefix().to_string(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route(LIVE_RELOAD_PATH, get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}/", ip, port, blog.config.prefix());
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let blog = blog.clone();
        tokio::task::spawn_blocking(move || {
            // Nobody listening is fine
            let notify_browsers = || {
                let _ = reload_tx.send(());
            };
            if let Err(e) = generate::watch_with(&blog, notify_browsers) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files from the public directory under the path prefix
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    mut request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    let Some(site_path) = strip_prefix(&path, &state.prefix) else {
        if path == "/" {
            return Redirect::temporary(&format!("{}/", state.prefix)).into_response();
        }
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    let file_path = resolve_file(&state.public_dir, site_path);
    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        return match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        };
    }

    // Hand the prefix-free path to tower-http
    let rewritten = match request.uri().query() {
        Some(query) => format!("{}?{}", site_path, query),
        None => site_path.to_string(),
    };
    match rewritten.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(_) => return (StatusCode::BAD_REQUEST, "Bad request").into_response(),
    }

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Site path of a request path, or None when it lies outside the prefix
fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }
    match path.strip_prefix(prefix) {
        Some("") => Some("/"),
        Some(rest) if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// File backing a site path: directories map to their `index.html`
fn resolve_file(public_dir: &Path, site_path: &str) -> PathBuf {
    let clean_path = site_path.trim_start_matches('/');
    let candidate = public_dir.join(clean_path);

    if clean_path.is_empty() || candidate.is_dir() {
        candidate.join("index.html")
    } else {
        candidate
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
