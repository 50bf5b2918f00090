/// Title picker and a row of poster cards filled from `/api/v1/recommendations`
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Movie Recommender</title>
<style>
  :root { --primary: #4361ee; --accent: #3a0ca3; --text: #212529; --muted: #6c757d; }
  body { margin: 0; font-family: Roboto, sans-serif; color: var(--text); background: #fff; }
  header { text-align: center; padding: 2rem 0; border-bottom: 1px solid rgba(0,0,0,.1); }
  header h1 { color: var(--primary); font-size: 2.5rem; margin: 0 0 .5rem; }
  header p { color: var(--muted); margin: 0; }
  main { max-width: 1100px; margin: 0 auto; padding: 2rem 1rem; }
  .picker { max-width: 560px; margin: 0 auto; text-align: center; }
  select { width: 100%; padding: .6rem; border-radius: 8px; border: 1px solid rgba(0,0,0,.1); }
  button { margin: 1.5rem auto; padding: .75rem 2rem; border: 0; border-radius: 8px;
           background: var(--primary); color: #fff; font-weight: 600; cursor: pointer; }
  button:hover { background: var(--accent); }
  h2 { text-align: center; color: var(--primary); }
  .cards { display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; }
  .card { border-radius: 8px; padding: 1rem; box-shadow: 0 2px 8px rgba(0,0,0,.1); }
  .card img { width: 100%; border-radius: 8px; }
  .card div { font-weight: 600; text-align: center; margin-top: .75rem; }
  .error { color: #b00020; text-align: center; }
  @media (max-width: 768px) { .cards { grid-template-columns: repeat(2, 1fr); } }
</style>
</head>
<body>
<header>
  <h1>Movie Recommender System</h1>
  <p>Discover your next favorite movie based on your current preferences</p>
</header>
<main>
  <div class="picker">
    <label for="movie">Search or select a movie from the dropdown:</label>
    <select id="movie"></select>
    <button id="go" type="button">Get Recommendations</button>
  </div>
  <section id="results"></section>
</main>
<script>
const select = document.getElementById("movie");
const results = document.getElementById("results");

function text(tag, value, cls) {
  const el = document.createElement(tag);
  el.textContent = value;
  if (cls) el.className = cls;
  return el;
}

async function loadMovies() {
  const response = await fetch("/api/v1/movies");
  const body = await response.json();
  if (!response.ok) { results.replaceChildren(text("p", body.error, "error")); return; }
  for (const movie of body) {
    const option = document.createElement("option");
    option.value = movie.id;
    option.textContent = movie.title;
    select.appendChild(option);
  }
}

async function recommend() {
  results.replaceChildren(text("p", "Finding the perfect recommendations for you..."));
  const response = await fetch("/api/v1/recommendations?movie_id=" + encodeURIComponent(select.value));
  const body = await response.json();
  if (!response.ok) { results.replaceChildren(text("p", body.error, "error")); return; }
  const cards = document.createElement("div");
  cards.className = "cards";
  for (const movie of body.recommendations) {
    const card = document.createElement("div");
    card.className = "card";
    const img = document.createElement("img");
    img.src = movie.poster_url;
    img.alt = movie.title;
    card.append(img, text("div", movie.title));
    cards.appendChild(card);
  }
  results.replaceChildren(text("h2", 'Top Recommendations for "' + body.query.title + '"'), cards);
}

document.getElementById("go").addEventListener("click", recommend);
loadMovies();
</script>
</body>
</html>
"##;

/// Blocking error page shown when the artifacts are unavailable
pub fn unavailable(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Movie Recommender</title></head>\
         <body><p style=\"color:#b00020;text-align:center\">{}</p></body></html>\n",
        escape(message)
    )
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
