use crate::dates;
use crate::store::TrackerData;
use chrono::{Datelike, NaiveDate};

pub fn render_index(today: NaiveDate, data: &TrackerData) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &dates::to_iso(today))
        .replace("{{YEAR}}", &today.year().to_string())
        .replace("{{MONTH}}", &today.month().to_string())
        .replace("{{QUARTER}}", &dates::quarter_of(today).to_string())
        .replace("{{TARGET}}", &data.target_per_quarter.to_string())
}

pub const MANIFEST: &str = r##"{
  "name": "Office Attendance Tracker",
  "short_name": "Office Tracker",
  "start_url": "/",
  "display": "standalone",
  "background_color": "#0f172a",
  "theme_color": "#0f172a",
  "icons": [{ "src": "/icon.svg", "sizes": "any", "type": "image/svg+xml" }]
}
"##;

pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
  <rect width="64" height="64" rx="12" fill="#0f172a"/>
  <rect x="10" y="14" width="44" height="40" rx="6" fill="none" stroke="#60a5fa" stroke-width="3"/>
  <line x1="10" y1="26" x2="54" y2="26" stroke="#60a5fa" stroke-width="3"/>
  <path d="M22 38l7 7 13-13" fill="none" stroke="#22c55e" stroke-width="4" stroke-linecap="round" stroke-linejoin="round"/>
</svg>
"##;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="theme-color" content="#0f172a" />
  <link rel="manifest" href="/manifest.webmanifest" />
  <link rel="icon" href="/icon.svg" />
  <title>Office Attendance Tracker</title>
  <style>
    :root {
      --bg: #0f172a;
      --card: #111827;
      --text: #e5e7eb;
      --muted: #9ca3af;
      --accent: #60a5fa;
      --green: #22c55e;
      --red: #ef4444;
      --yellow: #f59e0b;
      --border: #1f2937;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--text);
      font-family: system-ui, -apple-system, "Segoe UI", Roboto, Arial, sans-serif;
    }

    .container {
      max-width: 980px;
      margin: 24px auto;
      padding: 16px;
    }

    .topbar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      flex-wrap: wrap;
    }

    h1 {
      margin: 0;
      font-size: 1.5rem;
    }

    .goal {
      display: flex;
      align-items: center;
      gap: 8px;
      flex-wrap: wrap;
    }

    .goal input {
      width: 72px;
      padding: 6px 8px;
      background: var(--card);
      color: var(--text);
      border: 1px solid var(--border);
      border-radius: 6px;
    }

    button {
      padding: 8px 12px;
      background: var(--card);
      color: var(--text);
      border: 1px solid var(--border);
      border-radius: 6px;
      cursor: pointer;
    }

    button.export,
    button.today {
      border-color: var(--accent);
    }

    .pace {
      margin-top: 12px;
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 8px;
      padding: 12px;
    }

    .ahead { color: #bbf7d0; }
    .behind { color: #fecaca; }
    .onpace { color: var(--muted); }

    .pace-detail {
      margin-top: 6px;
      color: var(--muted);
    }

    .pace-note {
      margin-top: 4px;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .calendar-controls {
      display: flex;
      align-items: center;
      gap: 10px;
      margin: 16px 0;
    }

    .month-label {
      flex: 1;
      text-align: center;
      font-weight: 600;
    }

    .calendar table {
      width: 100%;
      border-collapse: collapse;
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 8px;
      overflow: hidden;
    }

    thead th {
      padding: 10px;
      border-bottom: 1px solid var(--border);
      color: var(--muted);
      font-weight: 600;
    }

    tbody td.day {
      height: 72px;
      border: 1px solid var(--border);
      position: relative;
      cursor: pointer;
    }

    tbody td.blank {
      background: #0b0f1a;
      border: 1px solid var(--border);
    }

    .date {
      position: absolute;
      top: 6px;
      right: 8px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .day.in {
      background: rgba(34, 197, 94, 0.18);
      outline: 2px solid rgba(34, 197, 94, 0.3);
    }

    .day.out {
      background: rgba(239, 68, 68, 0.18);
      outline: 2px solid rgba(239, 68, 68, 0.3);
    }

    .day.today {
      box-shadow: inset 0 0 0 2px var(--accent);
    }

    .day.selected {
      outline: 2px solid var(--yellow);
    }

    .details {
      margin-top: 18px;
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 8px;
      padding: 16px;
    }

    .selected-row {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 16px;
    }

    .status-row {
      display: flex;
      gap: 8px;
      margin-top: 8px;
      flex-wrap: wrap;
    }

    .status-row button.primary {
      border-color: var(--green);
      color: #bbf7d0;
    }

    .status-row button.warning {
      border-color: var(--red);
      color: #fecaca;
    }

    .notes textarea {
      width: 100%;
      margin-top: 6px;
      padding: 8px;
      background: #0b0f1a;
      color: var(--text);
      border: 1px solid var(--border);
      border-radius: 6px;
      resize: vertical;
    }

    .status {
      margin-top: 10px;
      font-size: 0.95rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #fecaca;
    }

    @media (max-width: 720px) {
      .selected-row {
        grid-template-columns: 1fr;
      }
      tbody td.day {
        height: 64px;
      }
    }
  </style>
</head>
<body>
  <main class="container">
    <header class="topbar">
      <h1>Office Attendance Tracker</h1>
      <div class="goal">
        <span id="quarter-label">Quarter {{QUARTER}} {{YEAR}}</span> &bull; Target:
        <input id="target" type="number" min="1" max="90" value="{{TARGET}}" />
        In Office: <b id="in-count">0</b>
        <button class="export" id="export-btn">Export Quarter CSV</button>
      </div>
    </header>

    <section class="pace">
      <div><strong>Pace:</strong> <span id="pace-line" class="onpace">On pace</span></div>
      <div class="pace-detail">
        Remaining business days in quarter: <b id="remaining">0</b> &bull;
        Need <b id="needed">0</b> more &bull;
        Avg required per business day: <b id="needed-per-day">0.00</b>
      </div>
      <div class="pace-note">
        <em>Note:</em> Business days count Mon&ndash;Fri and do not exclude holidays.
      </div>
    </section>

    <section class="calendar-controls">
      <button id="prev-btn">&#9664; Prev</button>
      <div class="month-label" id="month-label"></div>
      <button id="next-btn">Next &#9654;</button>
      <button class="today" id="today-btn">Today</button>
    </section>

    <section class="calendar">
      <table>
        <thead>
          <tr>
            <th>Sun</th><th>Mon</th><th>Tue</th><th>Wed</th><th>Thu</th><th>Fri</th><th>Sat</th>
          </tr>
        </thead>
        <tbody id="grid"></tbody>
      </table>
    </section>

    <section class="details">
      <h2>Selected Day</h2>
      <div class="selected-row">
        <div>
          <div id="selected-date"></div>
          <div class="status-row">
            Status:&nbsp;
            <button id="in-btn">In Office</button>
            <button id="out-btn">Not in Office</button>
            <button id="clear-btn">Clear</button>
          </div>
        </div>
        <div class="notes">
          <label>
            Notes:
            <textarea id="notes" rows="3" placeholder="Optional (e.g., reason, shift, location)"></textarea>
          </label>
        </div>
      </div>
      <div class="status" id="status"></div>
    </section>
  </main>

  <script>
    const TODAY = '{{TODAY}}';
    let view = { year: {{YEAR}}, month: {{MONTH}} };
    let selected = TODAY;
    let days = {};

    const gridEl = document.getElementById('grid');
    const monthLabelEl = document.getElementById('month-label');
    const quarterLabelEl = document.getElementById('quarter-label');
    const inCountEl = document.getElementById('in-count');
    const targetEl = document.getElementById('target');
    const paceLineEl = document.getElementById('pace-line');
    const remainingEl = document.getElementById('remaining');
    const neededEl = document.getElementById('needed');
    const neededPerDayEl = document.getElementById('needed-per-day');
    const selectedDateEl = document.getElementById('selected-date');
    const notesEl = document.getElementById('notes');
    const statusEl = document.getElementById('status');

    const MONTHS = ['January', 'February', 'March', 'April', 'May', 'June', 'July',
      'August', 'September', 'October', 'November', 'December'];

    const quarterOf = (month) => Math.floor((month - 1) / 3) + 1;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const loadState = async () => {
      const res = await fetch('/api/state');
      if (!res.ok) throw new Error('Unable to load state');
      const state = await res.json();
      days = state.days || {};
      targetEl.value = state.targetPerQuarter;
    };

    const loadPace = async () => {
      const quarter = quarterOf(view.month);
      const res = await fetch(`/api/pace?year=${view.year}&quarter=${quarter}`);
      if (!res.ok) throw new Error('Unable to load pace');
      const pace = await res.json();

      quarterLabelEl.textContent = `Quarter ${pace.quarter} ${pace.year}`;
      inCountEl.textContent = pace.in_office_count;
      remainingEl.textContent = pace.remaining_business_days;
      neededEl.textContent = pace.needed_to_hit_target;
      neededPerDayEl.textContent = pace.needed_per_business_day.toFixed(2);

      if (pace.ahead_behind > 0) {
        paceLineEl.textContent = `Ahead by ${pace.ahead_behind} ${pace.ahead_behind === 1 ? 'day' : 'days'}`;
        paceLineEl.className = 'ahead';
      } else if (pace.ahead_behind < 0) {
        const behind = Math.abs(pace.ahead_behind);
        paceLineEl.textContent = `Behind by ${behind} ${behind === 1 ? 'day' : 'days'}`;
        paceLineEl.className = 'behind';
      } else {
        paceLineEl.textContent = 'On pace';
        paceLineEl.className = 'onpace';
      }
    };

    const loadCalendar = async () => {
      const res = await fetch(`/api/calendar?year=${view.year}&month=${view.month}`);
      if (!res.ok) throw new Error('Unable to load calendar');
      const cal = await res.json();

      monthLabelEl.textContent = `${MONTHS[cal.month - 1]} ${cal.year}`;
      gridEl.innerHTML = '';
      for (const week of cal.weeks) {
        const row = document.createElement('tr');
        for (const iso of week) {
          const cell = document.createElement('td');
          if (!iso) {
            cell.className = 'blank';
          } else {
            const entry = days[iso];
            const classes = ['day'];
            if (entry && entry.status === 'in') classes.push('in');
            if (entry && entry.status === 'out') classes.push('out');
            if (iso === TODAY) classes.push('today');
            if (iso === selected) classes.push('selected');
            cell.className = classes.join(' ');
            cell.title = (entry && entry.notes) || '';
            const label = document.createElement('div');
            label.className = 'date';
            label.textContent = Number(iso.slice(8));
            cell.appendChild(label);
            cell.addEventListener('click', () => selectDay(iso));
          }
          row.appendChild(cell);
        }
        gridEl.appendChild(row);
      }
    };

    const renderSelected = () => {
      selectedDateEl.textContent = selected;
      const entry = days[selected];
      notesEl.value = (entry && entry.notes) || '';
    };

    const refresh = async () => {
      await loadState();
      await Promise.all([loadCalendar(), loadPace()]);
      renderSelected();
    };

    const selectDay = (iso) => {
      selected = iso;
      loadCalendar().catch((err) => setStatus(err.message, 'error'));
      renderSelected();
    };

    const sendDay = async (status) => {
      const res = await fetch('/api/day', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ date: selected, status })
      });
      if (!res.ok) throw new Error(await res.text() || 'Save failed');
      await refresh();
      setStatus('Saved', '');
    };

    const sendNote = async () => {
      const res = await fetch('/api/note', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ date: selected, notes: notesEl.value })
      });
      if (!res.ok) throw new Error(await res.text() || 'Save failed');
      await loadState();
      await loadCalendar();
    };

    const sendTarget = async () => {
      const res = await fetch('/api/target', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ target: Number(targetEl.value) })
      });
      if (!res.ok) throw new Error(await res.text() || 'Invalid target');
      await loadPace();
    };

    document.getElementById('in-btn').addEventListener('click', () =>
      sendDay('in').catch((err) => setStatus(err.message, 'error')));
    document.getElementById('out-btn').addEventListener('click', () =>
      sendDay('out').catch((err) => setStatus(err.message, 'error')));
    document.getElementById('clear-btn').addEventListener('click', () =>
      sendDay(null).catch((err) => setStatus(err.message, 'error')));
    notesEl.addEventListener('change', () =>
      sendNote().catch((err) => setStatus(err.message, 'error')));
    targetEl.addEventListener('change', () =>
      sendTarget().catch((err) => setStatus(err.message, 'error')));

    document.getElementById('prev-btn').addEventListener('click', () => {
      view.month -= 1;
      if (view.month < 1) { view.month = 12; view.year -= 1; }
      refresh().catch((err) => setStatus(err.message, 'error'));
    });
    document.getElementById('next-btn').addEventListener('click', () => {
      view.month += 1;
      if (view.month > 12) { view.month = 1; view.year += 1; }
      refresh().catch((err) => setStatus(err.message, 'error'));
    });
    document.getElementById('today-btn').addEventListener('click', () => {
      view = { year: Number(TODAY.slice(0, 4)), month: Number(TODAY.slice(5, 7)) };
      selected = TODAY;
      refresh().catch((err) => setStatus(err.message, 'error'));
    });
    document.getElementById('export-btn').addEventListener('click', () => {
      const quarter = quarterOf(view.month);
      window.location.href = `/api/export?year=${view.year}&quarter=${quarter}`;
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;
