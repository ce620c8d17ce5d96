//! Embedded stylesheet for the dashboard.
//!
//! Compiled into the binary; no external assets, no build tools, no CDN.

pub const STYLE_CSS: &str = r##":root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Shell */
.shell { display: flex; min-height: 100vh; }
aside.sidebar {
  width: 220px;
  flex-shrink: 0;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 20px 12px;
}
aside.sidebar h2 {
  font-size: 18px;
  font-family: var(--mono);
  color: var(--accent);
  margin: 0 8px 20px;
}
aside.sidebar ul { list-style: none; }
aside.sidebar a {
  display: block;
  padding: 8px 12px;
  border-radius: 6px;
  color: var(--text-muted);
  text-decoration: none;
  font-weight: 500;
}
aside.sidebar a:hover { color: var(--text); background: rgba(255,255,255,0.04); }
aside.sidebar a.active { background: var(--accent); color: #fff; }

.main { flex: 1; display: flex; flex-direction: column; }
header.topbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 16px 24px;
  border-bottom: 1px solid var(--border);
}
header.topbar h1 { font-size: 20px; font-weight: 600; }
header.topbar .subtitle { color: var(--text-muted); font-size: 13px; }
.content { padding: 24px; max-width: 1200px; width: 100%; }

/* Cards */
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}
.card h2 { font-size: 16px; font-weight: 600; }
.card .description { color: var(--text-muted); font-size: 13px; margin-top: 2px; }
.card-body { margin-top: 16px; }

.grid-2 { display: grid; grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); gap: 16px; }
.stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 16px;
  margin-bottom: 24px;
}
.stat-card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
}
.stat-card .label {
  font-size: 12px;
  color: var(--text-muted);
  text-transform: uppercase;
  letter-spacing: 0.5px;
}
.stat-card .value { font-size: 28px; font-weight: 700; font-family: var(--mono); color: var(--accent); }
.stat-card .description { color: var(--text-muted); font-size: 13px; }
.trend { display: inline-block; margin-top: 12px; padding: 2px 8px; border-radius: 4px; font-size: 12px; }
.trend.up { color: var(--green); border: 1px solid var(--green); }
.trend.down { color: var(--red); border: 1px solid var(--red); }
.trend.neutral { color: var(--text-muted); border: 1px solid var(--border); }

/* Banners and states */
.banner { padding: 12px 16px; border-radius: var(--radius); margin-bottom: 16px; border-left: 4px solid; }
.banner.error { border-color: var(--red); background: rgba(248,81,73,0.1); color: var(--red); }
.banner.success { border-color: var(--green); background: rgba(63,185,80,0.1); color: var(--green); }
.banner h3 { font-size: 15px; margin-bottom: 4px; }
.status { display: flex; align-items: center; gap: 8px; }
.status .dot { width: 10px; height: 10px; border-radius: 50%; }
.status.online .dot { background: var(--green); }
.status.offline .dot { background: var(--red); }
.loading, .empty { color: var(--text-muted); padding: 32px; text-align: center; }
.spinner {
  display: inline-block; width: 14px; height: 14px; margin-right: 8px;
  border: 2px solid var(--accent); border-bottom-color: transparent; border-radius: 50%;
}

/* Bar chart */
.bar-chart { display: flex; flex-direction: column; gap: 8px; }
.bar-row { display: grid; grid-template-columns: 150px 1fr 80px; align-items: center; gap: 8px; }
.bar-label { font-size: 12px; color: var(--text-muted); overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.bar-track { height: 18px; background: var(--bg); border-radius: 4px; overflow: hidden; }
.bar-fill { display: block; height: 100%; border-radius: 4px; }
.bar-value { font-family: var(--mono); font-size: 12px; text-align: right; }

/* Share bar */
.dist-bar { display: flex; height: 28px; border-radius: 6px; overflow: hidden; margin-bottom: 12px; }
.dist-bar .seg { display: block; height: 100%; }
.legend { list-style: none; display: flex; flex-wrap: wrap; gap: 12px; font-size: 12px; color: var(--text-muted); }
.swatch { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin-right: 4px; }

/* Line chart */
.line-chart { width: 100%; max-width: 520px; }
.line-chart .plot-area { fill: none; stroke: var(--border); }
.line-chart .axis-label { fill: var(--text-muted); font-size: 11px; }
.curve-score { margin-top: 8px; text-align: center; }
.curve-score strong { color: var(--accent); font-family: var(--mono); }

/* Tables */
table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { padding: 8px 10px; border-bottom: 1px solid var(--border); text-align: left; }
th { color: var(--text-muted); font-weight: 600; font-size: 12px; text-transform: uppercase; }
td.num { font-family: var(--mono); text-align: right; }
.heatmap { overflow-x: auto; }
.heatmap td.cell { text-align: center; color: #111; font-family: var(--mono); }

/* Tabs */
.tabs > input { display: none; }
.tabs > label {
  display: inline-block; padding: 10px 4px; margin-right: 20px; cursor: pointer;
  color: var(--text-muted); border-bottom: 2px solid transparent; font-weight: 500;
}
.tabs > .panel { display: none; padding-top: 16px; }
#tab-correlations:checked ~ label[for=tab-correlations],
#tab-distributions:checked ~ label[for=tab-distributions],
#tab-performance:checked ~ label[for=tab-performance] { color: var(--accent); border-color: var(--accent); }
#tab-correlations:checked ~ .panel-correlations,
#tab-distributions:checked ~ .panel-distributions,
#tab-performance:checked ~ .panel-performance { display: block; }

/* Forms */
form.grid-form { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
form .field label { display: block; margin-bottom: 4px; font-weight: 500; }
form .field .hint { color: var(--text-muted); font-size: 12px; }
input[type=text], input[type=number], select {
  width: 100%; padding: 8px; border-radius: 6px;
  border: 1px solid var(--border); background: var(--bg); color: var(--text);
}
.full { grid-column: 1 / -1; }
.btn {
  display: inline-block; padding: 10px 20px; border-radius: 6px; border: none;
  background: var(--accent); color: #fff; font-weight: 600; cursor: pointer; text-decoration: none;
}
.btn-outline { background: transparent; border: 1px solid currentColor; color: inherit; padding: 4px 12px; margin-top: 8px; }
.btn-block { width: 100%; }

/* Prediction result */
.outcome { display: flex; align-items: center; gap: 16px; margin-bottom: 16px; }
.outcome .badge { width: 56px; height: 56px; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-size: 24px; }
.outcome.fault .badge { background: rgba(248,81,73,0.15); color: var(--red); }
.outcome.normal .badge { background: rgba(63,185,80,0.15); color: var(--green); }
.outcome.fault .label { color: var(--red); }
.outcome.normal .label { color: var(--green); }
.confidence { height: 24px; background: var(--border); border-radius: 12px; overflow: hidden; margin: 8px 0 16px; }
.confidence .fill { height: 100%; display: flex; align-items: center; justify-content: center; color: #fff; font-size: 12px; }
.confidence.fault .fill { background: var(--red); }
.confidence.normal .fill { background: var(--green); }
.probabilities { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; padding: 12px; border: 1px solid var(--border); border-radius: var(--radius); }
.probabilities .fault { color: var(--red); font-weight: 600; }
.probabilities .normal { color: var(--green); font-weight: 600; }
"##;
