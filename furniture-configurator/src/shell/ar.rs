use crate::engine::assets::catalog::{Catalog, ModelCatalogEntry};
use crate::rpc::web_rpc::WebRpcInterface;
use crate::session::events::SelectionSource;
use crate::session::state::ViewerSession;
use bevy::prelude::*;
use constants::path::WEB_ASSET_ROOT;
use serde::Serialize;

const SCENE_VIEWER_PACKAGE: &str = "com.google.android.googlequicksearchbox";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArPlatform {
    Android,
    Ios,
    Other,
}

impl ArPlatform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ua.contains("android") {
            Self::Android
        } else if ["iphone", "ipad", "ipod"].iter().any(|d| ua.contains(d)) {
            Self::Ios
        } else {
            Self::Other
        }
    }
}

/// Request to open the active model in the platform AR viewer.
#[derive(Event, Debug, Clone)]
pub struct ViewInAr {
    pub source: SelectionSource,
}

/// Link that opens `entry` in the platform's AR viewer, or `None` where the
/// platform has no viewer or the entry has no file for it.
pub fn build_ar_link(platform: ArPlatform, entry: &ModelCatalogEntry, origin: &str) -> Option<String> {
    let ar = entry.ar_assets();
    match platform {
        ArPlatform::Android => {
            let file = urlencoding::encode(&absolute_asset_url(origin, ar.glb.as_deref()?)).into_owned();
            let title = urlencoding::encode(&entry.display_name).into_owned();
            Some(format!(
                "intent://arvr.google.com/scene-viewer/1.0?file={file}&mode=ar_preferred&title={title}\
                 #Intent;scheme=https;package={SCENE_VIEWER_PACKAGE};\
                 action=android.intent.action.VIEW;S.browser_fallback_url={file};end;"
            ))
        }
        ArPlatform::Ios => ar.usdz.as_deref().map(|usdz| absolute_asset_url(origin, usdz)),
        ArPlatform::Other => None,
    }
}

fn absolute_asset_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}/{}",
        origin.trim_end_matches('/'),
        WEB_ASSET_ROOT,
        path.trim_start_matches('/')
    )
}

pub fn handle_ar_requests(
    mut events: EventReader<ViewInAr>,
    catalog: Res<Catalog>,
    session: Res<ViewerSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let Some(entry) = catalog.get(session.active_model_id()) else {
            continue;
        };
        let (platform, origin) = browser_context();
        let link = build_ar_link(platform, entry, &origin);

        match &link {
            Some(link) => {
                info!("→ AR handoff for {} via {:?}", entry.id, event.source);
                navigate_to(link);
            }
            None => info!("AR not available for {} on {:?}", entry.id, platform),
        }

        rpc_interface.send_notification(
            "ar_handoff",
            serde_json::json!({
                "model_id": entry.id,
                "platform": platform,
                "link": link,
            }),
        );
    }
}

/// Platform and page origin as reported by the browser.
fn browser_context() -> (ArPlatform, String) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return (ArPlatform::Other, String::new());
        };
        let platform = window
            .navigator()
            .user_agent()
            .map(|ua| ArPlatform::from_user_agent(&ua))
            .unwrap_or(ArPlatform::Other);
        let origin = window.location().origin().unwrap_or_default();
        (platform, origin)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        (ArPlatform::Other, String::new())
    }
}

fn navigate_to(link: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(link) {
                error!("Failed to open AR viewer: {:?}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = link;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::{ArAssets, AssetReference, LayoutHints};

    fn entry(ar: Option<ArAssets>) -> ModelCatalogEntry {
        ModelCatalogEntry {
            id: "bedside".into(),
            display_name: "Bedside Panel".into(),
            thumbnail_path: "images/BedsidePanel.jpg".into(),
            asset: AssetReference::Generic {
                path: "models/BedsidePanel.glb".into(),
            },
            layout: LayoutHints::default(),
            ar,
        }
    }

    #[test]
    fn user_agent_detection() {
        assert_eq!(
            ArPlatform::from_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"),
            ArPlatform::Android
        );
        assert_eq!(
            ArPlatform::from_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"),
            ArPlatform::Ios
        );
        assert_eq!(
            ArPlatform::from_user_agent("Mozilla/5.0 (X11; Linux x86_64)"),
            ArPlatform::Other
        );
    }

    #[test]
    fn android_gets_scene_viewer_intent() {
        let link = build_ar_link(ArPlatform::Android, &entry(None), "https://shop.example/").unwrap();

        assert!(link.starts_with("intent://arvr.google.com/scene-viewer/1.0?file="));
        assert!(link.contains(
            "file=https%3A%2F%2Fshop.example%2Fassets%2Fmodels%2FBedsidePanel.glb&mode=ar_preferred"
        ));
        assert!(link.contains("title=Bedside%20Panel#Intent;scheme=https;"));
        assert!(link.contains(
            "S.browser_fallback_url=https%3A%2F%2Fshop.example%2Fassets%2Fmodels%2FBedsidePanel.glb;end;"
        ));
    }

    #[test]
    fn ios_needs_a_usdz_file() {
        assert_eq!(build_ar_link(ArPlatform::Ios, &entry(None), "https://shop.example"), None);

        let with_usdz = entry(Some(ArAssets {
            glb: None,
            usdz: Some("/ar/BedsidePanel.usdz".into()),
        }));
        assert_eq!(
            build_ar_link(ArPlatform::Ios, &with_usdz, "https://shop.example").as_deref(),
            Some("https://shop.example/assets/ar/BedsidePanel.usdz")
        );
    }

    #[test]
    fn desktop_has_no_ar_viewer() {
        assert_eq!(build_ar_link(ArPlatform::Other, &entry(None), "https://shop.example"), None);
    }
}
