use crate::data::dataset::{Dataset, Season};
use crate::server::api;
use crate::server::static_files;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(dataset: &Dataset, method: &str, path: &str) -> HttpResponse {
    if let Some(response) = static_files::try_serve_static(method, path) {
        return response;
    }
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => json_result(api::health_payload()),
        ("GET", "/api/seasons") => json_result(api::seasons_payload(dataset)),
        ("GET", "/api/lifetime") => json_result(api::lifetime_payload(dataset)),
        (method, path) if method == "GET" && path.starts_with("/api/seasons/") => {
            season_route(dataset, path)
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

/// `/api/seasons/{index}/{view}` dispatch. An index past the season list is a 404,
/// not a clamp: the viewer only sends indices it got from `/api/seasons`.
fn season_route(dataset: &Dataset, path: &str) -> HttpResponse {
    let rest = path.trim_start_matches("/api/seasons/");
    let mut parts = rest.splitn(2, '/');
    let index: usize = match parts.next().unwrap_or("").parse() {
        Ok(index) => index,
        Err(_) => return error_response(404, "Not Found", "Invalid season index"),
    };
    let Some(season) = dataset.seasons.get(index) else {
        return error_response(404, "Not Found", "Season not found");
    };
    match parts.next().unwrap_or("") {
        "standings" => json_result(api::standings_payload(season)),
        "standings.csv" => csv_result(season),
        "trend" => json_result(api::trend_payload(season)),
        "schedule" => json_result(api::schedule_payload(season)),
        "results" => json_result(api::results_payload(season)),
        "summary" => json_result(api::summary_payload(season)),
        "points" => json_result(api::points_payload(season)),
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_result(payload: Result<String, serde_json::Error>) -> HttpResponse {
    match payload {
        Ok(body) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        },
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

fn csv_result(season: &Season) -> HttpResponse {
    match api::standings_csv_payload(season) {
        Ok(body) => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/csv; charset=utf-8",
            body,
        },
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Paddock</title>
  <style>
    body[data-theme="dark"] { --bg:#14161a; --fg:#e8e8e8; --muted:#9aa0a6; --border:#31353c; }
    body[data-theme="light"] { --bg:#fff; --fg:#1a1a1a; --muted:#667; --border:#ddd; }
    body { background:var(--bg); color:var(--fg); font-family:system-ui,sans-serif; max-width:980px; margin:24px auto; padding:0 12px; }
    .tab { background:none; border:1px solid var(--border); color:var(--fg); padding:6px 12px; border-radius:6px; cursor:pointer; }
    .tab.active { border-color:var(--fg); }
    table { border-collapse:collapse; width:100%; margin:12px 0; }
    th, td { border-bottom:1px solid var(--border); text-align:left; padding:6px 8px; }
    .muted { color:var(--muted); }
    .hidden { display:none; }
    .dot { display:inline-block; width:10px; height:10px; border-radius:50%; margin-right:6px; }
    canvas { width:100%; border:1px solid var(--border); border-radius:6px; }
    select, button { font:inherit; }
  </style>
</head>
<body data-theme="dark">
  <h1>Paddock</h1>
  <p>
    <select id="season"></select>
    <span id="tabs">
      <button class="tab active" data-tab="standings">Standings</button>
      <button class="tab" data-tab="schedule">Schedule</button>
      <button class="tab" data-tab="results">Results</button>
      <button class="tab" data-tab="points">Points &amp; Rules</button>
      <button class="tab" data-tab="lifetime">Lifetime</button>
    </span>
    <button id="theme">theme</button>
    <a id="csv" href="#">CSV</a>
  </p>
  <div id="standings"></div>
  <div id="schedule" class="hidden"></div>
  <div id="results" class="hidden"></div>
  <div id="points" class="hidden"></div>
  <div id="lifetime" class="hidden"></div>

  <script>
    let active = 0;
    const $ = (sel) => document.querySelector(sel);
    const api = (path) => fetch(path).then((r) => { if (!r.ok) throw new Error('HTTP ' + r.status); return r.json(); });
    const cell = (v) => v == null || v === '' ? '-' : v;

    $('#theme').addEventListener('click', () => {
      document.body.dataset.theme = document.body.dataset.theme === 'dark' ? 'light' : 'dark';
    });
    $('#tabs').addEventListener('click', (e) => {
      const tab = e.target.closest('.tab'); if (!tab) return;
      document.querySelectorAll('.tab').forEach((t) => t.classList.toggle('active', t === tab));
      ['standings','schedule','results','points','lifetime'].forEach((id) =>
        $('#' + id).classList.toggle('hidden', id !== tab.dataset.tab));
    });

    function table(headers, rows) {
      return '<table><thead><tr>' + headers.map((h) => '<th>' + h + '</th>').join('') +
        '</tr></thead><tbody>' + rows.map((r) => '<tr>' + r.map((c) => '<td>' + c + '</td>').join('') + '</tr>').join('') +
        '</tbody></table>';
    }

    async function renderStandings() {
      const [data, trend] = await Promise.all([
        api('/api/seasons/' + active + '/standings'),
        api('/api/seasons/' + active + '/trend'),
      ]);
      $('#standings').innerHTML = table(
        ['Pos', 'Driver', '#', 'Total', 'Quali', 'Race', 'Adj', 'Wins', 'Starts'],
        data.standings.map((s) => [
          s.position,
          '<span class="dot" style="background:' + (s.color || '#888') + '"></span>' + s.name,
          cell(s.number), s.total, s.quali_points, s.race_points, s.adjustment_points, s.wins, s.starts,
        ])
      ) + '<canvas id="chart" width="940" height="300"></canvas>';
      drawTrend(trend);
    }

    function drawTrend(trend) {
      const cvs = $('#chart'); if (!cvs || !trend.snapshots.length) return;
      const ctx = cvs.getContext('2d');
      const padL = 36, padB = 24, W = cvs.width - padL - 10, H = cvs.height - padB - 10;
      const n = trend.snapshots.length, maxPos = Math.max(trend.drivers.length, 1);
      const x = (i) => padL + W * (n <= 1 ? 0 : i / (n - 1));
      const y = (p) => 10 + H * ((p - 1) / Math.max(1, maxPos - 1));
      ctx.clearRect(0, 0, cvs.width, cvs.height);
      ctx.fillStyle = '#888'; ctx.textAlign = 'center';
      trend.snapshots.forEach((s, i) => ctx.fillText('R' + s.round, x(i), cvs.height - 6));
      trend.drivers.forEach((d) => {
        ctx.strokeStyle = d.color || '#888'; ctx.lineWidth = 2; ctx.beginPath();
        trend.snapshots.forEach((s, i) => {
          const p = s.positions[d.id] || maxPos;
          if (i === 0) ctx.moveTo(x(i), y(p)); else ctx.lineTo(x(i), y(p));
        });
        ctx.stroke();
      });
    }

    async function renderSchedule() {
      const data = await api('/api/seasons/' + active + '/schedule');
      $('#schedule').innerHTML = table(
        ['Round', 'Track', 'Practice', 'Race', 'Counts'],
        data.schedule.map((r) => [r.round, r.track, cell(r.practice_date), cell(r.race_date), r.include_in_stats ? 'Yes' : 'No'])
      );
    }

    async function renderResults() {
      const data = await api('/api/seasons/' + active + '/results');
      $('#results').innerHTML = data.sheets.map((sheet) =>
        '<h3>Round ' + sheet.round + ' — ' + sheet.track + (sheet.included ? '' : ' <span class="muted">(excluded)</span>') + '</h3>' +
        table(['Q Pos', 'Driver', ''], sheet.qualifying.map((r) => [cell(r.position), r.driver, r.flag || ''])) +
        table(['R Pos', 'Driver', ''], sheet.race.map((r) => [cell(r.position), r.driver, r.flag || ''])) +
        (sheet.adjustments.length
          ? table(['Driver', 'Points', 'Note'], sheet.adjustments.map((a) => [a.driver, a.points, a.note]))
          : '<p class="muted">No adjustments.</p>')
      ).join('');
    }

    async function renderPoints() {
      const data = await api('/api/seasons/' + active + '/points');
      $('#points').innerHTML =
        '<h3>Qualifying</h3>' + table(['Pos', 'Points'], data.quali.map((v, i) => ['P' + (i + 1), cell(v)])) +
        '<h3>Race</h3>' + table(['Pos', 'Points'], data.race.map((v, i) => ['P' + (i + 1), cell(v)])) +
        '<h3>Rules</h3><p>' + (data.rules || '<span class="muted">No rules saved.</span>') + '</p>';
    }

    async function renderLifetime() {
      const data = await api('/api/lifetime');
      $('#lifetime').innerHTML = table(
        ['Driver', 'Seasons', 'Points', 'Wins', 'Finishes'],
        Object.entries(data.careers).map(([name, c]) => [
          '<span class="dot" style="background:' + (data.matrix.colors[name] || '#888') + '"></span>' + name,
          c.seasons_played, c.total_points, c.wins,
          (data.matrix.rows[name] || []).map((p, i) => 'S' + data.matrix.labels[i] + ':' + (p == null ? '-' : 'P' + p)).join(' '),
        ])
      );
    }

    function renderAll() {
      $('#csv').href = '/api/seasons/' + active + '/standings.csv';
      renderStandings(); renderSchedule(); renderResults(); renderPoints(); renderLifetime();
    }

    api('/api/seasons').then((data) => {
      active = data.active_season_index;
      const sel = $('#season');
      data.seasons.forEach((s) => {
        const opt = document.createElement('option');
        opt.value = s.index; opt.textContent = s.name || 'Season ' + s.label;
        sel.appendChild(opt);
      });
      sel.value = String(active);
      sel.onchange = () => { active = Number(sel.value); renderAll(); };
      renderAll();
    }).catch(() => {
      document.body.insertAdjacentHTML('beforeend', '<p class="muted">Failed to load season data.</p>');
    });
  </script>
</body>
</html>
"##
    .to_string()
}
