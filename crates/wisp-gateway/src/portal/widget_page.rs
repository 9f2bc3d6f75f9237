//! Widget HTML renderer for the embeddable chat front-end.
use wisp_console_ui::BotConfig;
use wisp_session::{ChatRuntime, FALLBACK_REPLY};

use super::{WIDGET_MESSAGE_ENDPOINT, WIDGET_TOGGLE_ENDPOINT};

pub(super) fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(super) fn render_widget_page(bot_config: &BotConfig, chat: &ChatRuntime) -> String {
    let mut message_rows = String::new();
    for message in chat.thread().messages() {
        message_rows.push_str(&format!(
            "        <div class=\"wisp-msg wisp-msg-{role}\">{content}</div>\n",
            role = message.role.as_str(),
            content = escape_html(&message.content),
        ));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{bot_name}</title>
  <style>
    :root {{
      color-scheme: light;
      font-family: "Segoe UI", sans-serif;
    }}
    body {{
      margin: 0;
      background: transparent;
    }}
    #wisp-widget {{
      position: fixed;
      bottom: 20px;
      right: 20px;
      display: flex;
      flex-direction: column;
      align-items: flex-end;
      gap: 15px;
    }}
    #wisp-widget-panel {{
      width: 350px;
      height: 500px;
      background: #ffffff;
      border-radius: 12px;
      box-shadow: 0 8px 24px rgba(0, 0, 0, 0.15);
      display: flex;
      flex-direction: column;
      overflow: hidden;
    }}
    #wisp-widget[data-panel-state="closed"] #wisp-widget-panel {{
      display: none;
    }}
    #wisp-widget-header {{
      background: {primary_color};
      color: #ffffff;
      padding: 16px;
      display: flex;
      justify-content: space-between;
      align-items: center;
      font-weight: 600;
    }}
    #wisp-widget-close {{
      background: none;
      border: 0;
      color: #ffffff;
      font-size: 1rem;
      cursor: pointer;
    }}
    #wisp-widget-thread {{
      flex: 1;
      padding: 16px;
      overflow-y: auto;
      display: flex;
      flex-direction: column;
      gap: 12px;
    }}
    .wisp-msg {{
      max-width: 80%;
      padding: 10px 14px;
      border-radius: 12px;
      font-size: 14px;
      line-height: 1.4;
      white-space: pre-wrap;
      word-break: break-word;
    }}
    .wisp-msg-user {{
      align-self: flex-end;
      background: {primary_color};
      color: #ffffff;
    }}
    .wisp-msg-bot {{
      align-self: flex-start;
      background: #f3f4f6;
      color: #1f2937;
    }}
    #wisp-widget-thinking {{
      color: #6b7280;
    }}
    #wisp-widget-composer {{
      padding: 16px;
      border-top: 1px solid #e5e7eb;
      display: flex;
      gap: 8px;
    }}
    #wisp-widget-input {{
      flex: 1;
      padding: 8px 12px;
      border-radius: 6px;
      border: 1px solid #d1d5db;
      outline: none;
      font-size: 14px;
    }}
    #wisp-widget-send {{
      background: {primary_color};
      color: #ffffff;
      border: 0;
      padding: 8px 14px;
      border-radius: 6px;
      cursor: pointer;
      font-weight: 600;
    }}
    #wisp-widget-send:disabled {{
      cursor: wait;
      opacity: 0.6;
    }}
    #wisp-widget-bubble {{
      width: 60px;
      height: 60px;
      border-radius: 30px;
      background: {primary_color};
      color: #ffffff;
      border: 0;
      box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
      cursor: pointer;
      font-size: 1.4rem;
    }}
  </style>
</head>
<body>
  <div id="wisp-widget" data-panel-state="{panel_state}">
    <section id="wisp-widget-panel" aria-label="Chat panel">
      <header id="wisp-widget-header">
        <span id="wisp-widget-title">{bot_name}</span>
        <button id="wisp-widget-close" type="button" aria-label="Close chat">X</button>
      </header>
      <div id="wisp-widget-thread">
{message_rows}        <div id="wisp-widget-thinking" class="wisp-msg wisp-msg-bot" hidden>Thinking...</div>
      </div>
      <div id="wisp-widget-composer">
        <input id="wisp-widget-input" type="text" autocomplete="off" placeholder="Type a message..." />
        <button id="wisp-widget-send" type="button">Send</button>
      </div>
    </section>
    <button id="wisp-widget-bubble" type="button" aria-label="Toggle chat">&#128172;</button>
  </div>
  <script>
    const MESSAGE_ENDPOINT = "{message_endpoint}";
    const TOGGLE_ENDPOINT = "{toggle_endpoint}";
    const FALLBACK_REPLY = "{fallback_reply}";
    const container = document.getElementById("wisp-widget");
    const thread = document.getElementById("wisp-widget-thread");
    const thinking = document.getElementById("wisp-widget-thinking");
    const input = document.getElementById("wisp-widget-input");
    const sendButton = document.getElementById("wisp-widget-send");

    function setPanelState(state) {{
      container.setAttribute("data-panel-state", state);
    }}

    async function togglePanel() {{
      try {{
        const response = await fetch(TOGGLE_ENDPOINT, {{ method: "POST" }});
        const payload = await response.json();
        setPanelState(payload.panel);
      }} catch (error) {{
        // Keep the toggle usable even if the portal round-trip fails.
        const next = container.getAttribute("data-panel-state") === "open" ? "closed" : "open";
        setPanelState(next);
      }}
    }}

    function appendMessage(role, text) {{
      const row = document.createElement("div");
      row.className = "wisp-msg wisp-msg-" + role;
      row.textContent = text;
      thread.insertBefore(row, thinking);
      thread.scrollTop = thread.scrollHeight;
      return row;
    }}

    async function sendMessage() {{
      const text = input.value.trim();
      if (text.length === 0) {{
        return;
      }}
      const optimistic = appendMessage("user", text);
      input.value = "";
      input.disabled = true;
      sendButton.disabled = true;
      thinking.hidden = false;
      try {{
        const response = await fetch(MESSAGE_ENDPOINT, {{
          method: "POST",
          headers: {{ "Content-Type": "application/x-www-form-urlencoded" }},
          body: new URLSearchParams({{ message: text }})
        }});
        if (!response.ok) {{
          appendMessage("bot", FALLBACK_REPLY);
          return;
        }}
        const payload = await response.json();
        if (payload.outcome === "busy" || payload.outcome === "ignored") {{
          optimistic.remove();
          return;
        }}
        appendMessage("bot", payload.reply);
      }} catch (error) {{
        appendMessage("bot", FALLBACK_REPLY);
      }} finally {{
        thinking.hidden = true;
        input.disabled = false;
        sendButton.disabled = false;
        input.focus();
      }}
    }}

    document.getElementById("wisp-widget-bubble").addEventListener("click", togglePanel);
    document.getElementById("wisp-widget-close").addEventListener("click", togglePanel);
    sendButton.addEventListener("click", sendMessage);
    input.addEventListener("keydown", (event) => {{
      if (event.key === "Enter") {{
        sendMessage();
      }}
    }});
  </script>
</body>
</html>
"#,
        bot_name = escape_html(&bot_config.name),
        primary_color = bot_config.primary_color,
        panel_state = chat.panel().as_str(),
        message_rows = message_rows,
        message_endpoint = WIDGET_MESSAGE_ENDPOINT,
        toggle_endpoint = WIDGET_TOGGLE_ENDPOINT,
        fallback_reply = FALLBACK_REPLY,
    )
}
