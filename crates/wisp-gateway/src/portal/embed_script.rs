//! Embed loader served to third-party pages via a script tag.
use super::WIDGET_ENDPOINT;

/// Identifier of the mount element the loader finds or creates.
pub(super) const WIDGET_MOUNT_ID: &str = "wisp-widget-root";

pub(super) fn render_widget_embed_script(public_base_url: &str) -> String {
    let base = public_base_url.trim_end_matches('/');
    format!(
        r#"(function () {{
  var MOUNT_ID = "{mount_id}";
  var WIDGET_URL = "{base}{widget_endpoint}";

  function mountWidget() {{
    var mount = document.getElementById(MOUNT_ID);
    if (!mount) {{
      mount = document.createElement("div");
      mount.id = MOUNT_ID;
      document.body.appendChild(mount);
    }}
    if (mount.querySelector("iframe[data-wisp-widget]")) {{
      return;
    }}
    var frame = document.createElement("iframe");
    frame.src = WIDGET_URL;
    frame.title = "Chat widget";
    frame.setAttribute("data-wisp-widget", "true");
    frame.style.position = "fixed";
    frame.style.bottom = "0";
    frame.style.right = "0";
    frame.style.width = "400px";
    frame.style.height = "600px";
    frame.style.border = "0";
    frame.style.background = "transparent";
    frame.style.zIndex = "9999";
    mount.appendChild(frame);
  }}

  if (document.readyState === "loading") {{
    document.addEventListener("DOMContentLoaded", mountWidget);
  }} else {{
    mountWidget();
  }}
}})();
"#,
        mount_id = WIDGET_MOUNT_ID,
        base = base,
        widget_endpoint = WIDGET_ENDPOINT,
    )
}
