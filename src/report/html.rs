use crate::domain::MatchedResult;
use crate::report::ArchetypeGroups;

/// Run counters shown in the report header
pub struct ReportStats {
    pub tournaments: usize,
    pub decks_scanned: usize,
    pub elapsed_secs: f64,
}

/// Render the whole report as one self-contained HTML document.
pub fn render(card: &str, groups: &ArchetypeGroups, stats: &ReportStats) -> String {
    let mut document = head_section(card, groups.match_count(), stats);

    for (label, results) in groups.iter() {
        document.push_str(&archetype_section(label, results));
    }

    document.push_str(TAIL);
    document
}

fn head_section(card: &str, match_count: usize, stats: &ReportStats) -> String {
    let card = escape(card);
    let elapsed = format_elapsed(stats.elapsed_secs);

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Decks with “{card}”</title>
<meta name="viewport" content="width=device-width,initial-scale=1">
<style>{STYLE}</style>
</head>
<body>
<div class="header">
  <div class="h1">Decks containing “{card}”</div>
  <div class="meta">
    <div><strong>{match_count}</strong> matches · grouped by archetype</div>
    <div>{tournaments} tournaments · {decks} deck pages scanned</div>
    <div>Elapsed: {elapsed}</div>
  </div>
  <div class="controls">
    <input id="filter" type="search" placeholder="Filter by archetype or player…">
  </div>
</div>
<div class="container">
"#,
        tournaments = stats.tournaments,
        decks = stats.decks_scanned,
    )
}

fn archetype_section(label: &str, results: &[MatchedResult]) -> String {
    let mut section = format!(
        r#"<div class="group">
<div class="group-hd"><div class="group-title">{}</div><div class="badge">{}</div></div>
<table class="table">
<thead><tr><th>Win %</th><th>Record</th><th>Matches</th><th>Player</th><th>Link</th></tr></thead>
<tbody>
"#,
        escape(label),
        results.len(),
    );

    for matched in results {
        section.push_str(&result_row(label, matched));
    }

    section.push_str("</tbody></table></div>\n");
    section
}

fn result_row(label: &str, matched: &MatchedResult) -> String {
    let result = &matched.result;
    let player = display_player(&result.player);

    format!(
        r#"<tr data-arch="{arch}" data-player="{player_key}">
<td class="pct">{pct:.2}%</td>
<td class="rec">{record}</td>
<td class="num">{games}</td>
<td>{player}</td>
<td><a href="{url}" target="_blank">Open deck</a></td>
</tr>
"#,
        arch = escape(&label.to_lowercase()),
        player_key = escape(&player.to_lowercase()),
        pct = matched.win_rate * 100.0,
        record = record_cell(result.record()),
        games = matched.games_played,
        player = escape(&player),
        url = escape(&result.deck_url),
    )
}

fn display_player(player: &str) -> String {
    let trimmed = player.trim();
    if trimmed.is_empty() {
        "—".to_string()
    } else {
        trimmed.to_string()
    }
}

fn record_cell(record: String) -> String {
    match record.strip_suffix(" Drop") {
        Some(plain) => format!(r#"{} <span class="drop">Drop</span>"#, plain),
        None => record,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_elapsed(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{:.2}s", seconds);
    }
    let total = seconds.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

const STYLE: &str = r#"
:root { --bg:#0b0f14; --fg:#e6edf3; --muted:#9fb1c1; --card:#121821; --accent:#7cc4ff; --chip:#1e2630; }
* { box-sizing: border-box; }
body { margin:0; font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial; background:var(--bg); color:var(--fg); }
.header { padding:20px 24px; border-bottom:1px solid #1f2a36; position:sticky; top:0; background:rgba(11,15,20,.9); }
.h1 { font-size:20px; margin:0 0 6px; }
.meta { color:var(--muted); font-size:14px; display:flex; gap:12px; flex-wrap:wrap; }
.container { max-width:1100px; margin:20px auto; padding:0 16px 40px; }
.group { margin:22px 0; background:var(--card); border:1px solid #1f2a36; border-radius:14px; overflow:hidden; }
.group-hd { display:flex; align-items:center; justify-content:space-between; padding:12px 16px; border-bottom:1px solid #1f2a36; }
.group-title { font-weight:600; font-size:16px; }
.badge { background:var(--chip); padding:4px 8px; border-radius:999px; color:var(--muted); font-size:12px; }
.table { width:100%; border-collapse:collapse; }
.table th, .table td { padding:10px 12px; text-align:left; border-bottom:1px solid #1f2a36; font-size:14px; }
.table th { color:var(--muted); font-weight:500; }
.table a { color:var(--accent); text-decoration:none; }
.table a:hover { text-decoration:underline; }
.pct, .rec, .num { font-variant-numeric: tabular-nums; white-space: nowrap; }
.drop { color:#ff9c9c; font-weight:600; margin-left:6px; }
.controls { margin-top:10px; display:flex; gap:8px; flex-wrap:wrap; }
input[type="search"] { background:#0f141b; color:var(--fg); border:1px solid #1f2a36; border-radius:10px; padding:8px 10px; outline:none; }
.hide { display:none; }
.footer { color:var(--muted); text-align:center; padding:20px 0 40px; }
"#;

const TAIL: &str = r#"</div>
<div class="footer">Generated locally · Use your browser’s “Print → Save as PDF” to export</div>
<script>
const q = document.getElementById('filter');
q.addEventListener('input', () => {
  const needle = q.value.trim().toLowerCase();
  document.querySelectorAll('tbody tr').forEach(tr => {
    if (!needle) { tr.classList.remove('hide'); return; }
    const arch = tr.getAttribute('data-arch') || '';
    const player = tr.getAttribute('data-player') || '';
    tr.classList.toggle('hide', !(arch.includes(needle) || player.includes(needle)));
  });
});
</script>
</body>
</html>
"#;
