use ideacheck_core::format::escape_html;
use ideacheck_core::render::HistoryPanel;
use ideacheck_core::session::{NoticeKind, ViewSnapshot};

const PAGE_CSS: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#0f172a;color:#e2e8f0}
main{max-width:1100px;margin:0 auto;padding:32px 20px}
nav{display:flex;justify-content:space-between;align-items:center;margin-bottom:24px}
nav a,.btn{color:#e2e8f0;border:1px solid #334155;border-radius:8px;padding:6px 12px;text-decoration:none}
.input-section textarea{width:100%;min-height:140px;padding:14px;border-radius:12px;border:1px solid #334155;background:#1e293b;color:inherit;font:inherit}
.input-section.shake textarea{border-color:#ef4444;animation:shake .4s}
@keyframes shake{25%{transform:translateX(-6px)}75%{transform:translateX(6px)}}
.input-section button{margin-top:12px;padding:10px 20px;border:0;border-radius:10px;background:#6366f1;color:#fff;font-weight:600}
.loading{text-align:center;padding:40px;color:#94a3b8}
.results-header{display:flex;justify-content:space-between;align-items:center;gap:12px}
.results-actions{display:flex;gap:8px}
.card-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(460px,1fr));gap:16px;margin-top:16px}
.result-card{background:#1e293b;border-radius:14px;padding:18px;border-top:4px solid #334155}
.result-card header{display:flex;align-items:center;gap:8px}
.result-card header h3{flex:1;margin:0}
.card-icon svg,.modal-icon svg{width:22px;height:22px}
.market{border-color:#22d3ee;color:#22d3ee}.risk{border-color:#f59e0b;color:#f59e0b}
.money{border-color:#10b981;color:#10b981}.investor{border-color:#8b5cf6;color:#8b5cf6}
.card-content{color:#cbd5e1;max-height:320px;overflow:auto}
.modal-overlay{position:fixed;inset:0;background:rgba(0,0,0,.6);display:flex;align-items:center;justify-content:center}
.modal{background:#1e293b;border-radius:16px;width:min(860px,92vw);max-height:86vh;overflow:auto;padding:24px}
.modal header{display:flex;align-items:center;gap:10px}.modal header h2{flex:1}
.modal-close{font-size:28px;color:#94a3b8;text-decoration:none}
.history-panel{position:fixed;top:0;right:0;bottom:0;width:380px;background:#111827;padding:20px;overflow:auto}
.history-item{border-bottom:1px solid #1f2937;padding:12px 0}
.history-item-date{font-size:12px;color:#94a3b8}
.history-item-actions{display:flex;gap:8px;margin-top:6px}
.history-empty{color:#94a3b8;text-align:center;margin-top:60px}
.toast{position:fixed;bottom:24px;left:50%;transform:translateX(-50%);padding:12px 20px;border-radius:10px;animation:fade 3s forwards}
.toast.error{background:#7f1d1d}.toast.info{background:#1e3a8a}
@keyframes fade{0%,85%{opacity:1}100%{opacity:0;visibility:hidden}}
"#;

/// Options that only affect one paint.
#[derive(Debug, Default)]
pub struct PageOptions {
    pub history: Option<HistoryPanel>,
    pub empty_idea: bool,
}

pub fn render(snapshot: &ViewSnapshot, opts: &PageOptions) -> String {
    let mut body = String::new();
    body.push_str(
        "<nav><strong>AI Startup Validator</strong><a href=\"/history\">History</a></nav>",
    );

    if snapshot.loading {
        body.push_str(
            "<div class=\"loading\" id=\"loading\"><p>Analyzing your idea&hellip;</p></div>",
        );
    } else if let Some(cards) = &snapshot.cards {
        body.push_str(&cards.to_html());
    } else {
        body.push_str(&input_form(&snapshot.draft, opts.empty_idea));
    }

    if let Some(modal) = &snapshot.modal {
        body.push_str(&modal.to_html());
    }
    if let Some(panel) = &opts.history {
        body.push_str(&panel.to_html());
    }
    if let Some(notice) = &snapshot.notice {
        let kind = match notice.kind {
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        body.push_str(&format!(
            "<div class=\"toast {kind}\" role=\"status\">{}</div>",
            escape_html(&notice.message)
        ));
    }

    // Poll while another request holds the validation.
    let refresh = if snapshot.loading {
        "<meta http-equiv=\"refresh\" content=\"2\">"
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">{refresh}\
         <title>AI Startup Validator</title><style>{PAGE_CSS}</style></head>\
         <body><main>{body}</main></body></html>"
    )
}

fn input_form(draft: &str, empty_idea: bool) -> String {
    let class = if empty_idea {
        "input-section shake"
    } else {
        "input-section"
    };
    format!(
        "<section class=\"{class}\"><form method=\"post\" action=\"/analyze\">\
         <textarea id=\"idea-input\" name=\"idea\" placeholder=\"Describe your startup idea...\">{}</textarea>\
         <button type=\"submit\" id=\"analyze-btn\">Validate idea</button></form></section>",
        escape_html(draft)
    )
}
