//! Serialization of speaker runs into one self-contained HTML page: video
//! on top, draggable separator, search bar, scrollable transcript. The
//! embedded script is the page-side twin of the `sync` and `search`
//! engines; keep the two in step when changing either.

use crate::runs::SpeakerRun;
use crate::timecode::format_time;

/// Render the complete document. Every cue-bearing node carries its start
/// time in seconds as a `data-time` attribute; run headers carry the run's
/// anchor time on both the name and the human-readable timestamp.
pub fn render_page(runs: &[SpeakerRun], video_url: &str, title: &str) -> String {
    let mut transcript = String::new();
    for run in runs {
        transcript.push_str("      <div class=\"speaker-section\">\n");
        transcript.push_str(&format!(
            "        <span class=\"speakername\" data-time=\"{}\">{}</span> \
             <span class=\"timestamp\" data-time=\"{}\">[ {} ]</span>\n",
            run.start,
            escape_html(&run.speaker),
            run.start,
            format_time(run.start),
        ));
        for cue in &run.cues {
            transcript.push_str("        <p>\n");
            transcript.push_str(&format!(
                "          <span class=\"speakertext\" data-time=\"{}\">{}</span>\n",
                cue.start,
                escape_html(&cue.text),
            ));
            transcript.push_str("        </p>\n");
        }
        transcript.push_str("      </div>\n");
    }

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("  <meta charset=\"UTF-8\" />\n");
    page.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n");
    page.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    page.push_str("  <style>\n");
    page.push_str(STYLE);
    page.push_str("  </style>\n</head>\n<body>\n");
    page.push_str("  <div class=\"container\">\n");
    page.push_str("    <div id=\"video-container\">\n");
    page.push_str("      <video id=\"player\" controls>\n");
    page.push_str(&format!(
        "        <source src=\"{}\" type=\"video/mp4\" />\n",
        escape_html(video_url)
    ));
    page.push_str("        Your browser does not support the video tag.\n");
    page.push_str("      </video>\n    </div>\n\n");
    page.push_str("    <div id=\"separator\"></div>\n\n");
    page.push_str(SEARCH_BAR);
    page.push_str("    <div id=\"transcript-container\">\n");
    page.push_str("      <div class=\"transcript\">\n");
    page.push_str(&transcript);
    page.push_str("      </div>\n    </div>\n  </div>\n\n");
    page.push_str("  <script>\n");
    page.push_str(SCRIPT);
    page.push_str("  </script>\n</body>\n</html>\n");
    page
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const SEARCH_BAR: &str = r#"    <div id="search-container">
      <input type="text" id="search-input" placeholder="Search transcript..." />
      <button class="search-button" id="prev-button" disabled>Previous</button>
      <button class="search-button" id="next-button" disabled>Next</button>
      <span id="search-info"></span>
      <label id="autoscroll-label">
        <input type="checkbox" id="autoscroll-toggle" checked /> Auto-scroll
      </label>
    </div>

"#;

const STYLE: &str = r#"    html, body {
      height: 100%;
      margin: 0;
      font-family: Georgia, serif;
      background-color: #01182c;
      color: #ded9d9;
      line-height: 1.4;
    }
    .container {
      display: flex;
      flex-direction: column;
      height: 100vh;
    }
    /* Video container; its height is adjusted by dragging the separator */
    #video-container {
      padding: 10px;
      height: 50vh;
      overflow: hidden;
    }
    #video-container video {
      width: 100%;
      height: 100%;
      object-fit: contain;
    }
    #separator {
      position: relative;
      height: 5px;
      background: #ccc;
      cursor: ns-resize;
      touch-action: none;
      -webkit-user-select: none;
      user-select: none;
    }
    /* larger invisible hit area for touch devices */
    #separator::before {
      content: "";
      position: absolute;
      top: -10px;
      bottom: -10px;
      left: 0;
      right: 0;
    }
    #search-container {
      display: flex;
      align-items: center;
      gap: 10px;
      padding: 10px 20px;
      background-color: rgba(255, 255, 255, 0.05);
      border-top: 1px solid #ccc;
      border-bottom: 1px solid #ccc;
      flex-wrap: wrap;
    }
    #transcript-container {
      flex: 1;
      overflow-y: auto;
      padding: 30px;
      display: flex;
      justify-content: center;
    }
    .transcript {
      max-width: 1000px;
      width: 100%;
    }
    .transcript p {
      margin-bottom: 15px;
    }
    .timestamp {
      position: relative;
      color: white;
      cursor: pointer;
    }
    /* expanded hit area for timestamp clicks and touches */
    .timestamp::before {
      content: "";
      position: absolute;
      top: -15px;
      left: -15px;
      right: -15px;
      bottom: -15px;
    }
    .speakername {
      font-weight: bold;
      font-size: 1.15em;
      margin-right: 10px;
      cursor: pointer;
    }
    .speakertext {
      font-size: 1.1em;
      cursor: pointer;
    }
    .speakertext.active {
      background-color: rgba(74, 144, 226, 0.25);
      border-radius: 3px;
    }
    .speaker-section {
      margin-bottom: 25px;
      padding: 15px;
      border-radius: 10px;
    }
    .speaker-section:nth-child(odd) {
      background-color: rgba(255, 255, 255, 0.03);
    }
    .speaker-section:nth-child(even) {
      background-color: rgba(255, 255, 255, 0.06);
    }
    .speaker-section p {
      margin-top: 5px;
      margin-bottom: 10px;
      margin-left: 20px;
    }
    #search-input {
      flex: 1;
      min-width: 200px;
      padding: 8px 12px;
      border: 1px solid #555;
      border-radius: 4px;
      background-color: #002244;
      color: white;
      font-size: 16px;
    }
    #search-input:focus {
      outline: none;
      border-color: #4a90e2;
    }
    .search-button {
      padding: 8px 16px;
      background-color: #4a90e2;
      color: white;
      border: none;
      border-radius: 4px;
      cursor: pointer;
      font-size: 14px;
    }
    .search-button:hover {
      background-color: #357abd;
    }
    .search-button:disabled {
      background-color: #555;
      cursor: not-allowed;
    }
    #search-info {
      color: #aaa;
      font-size: 14px;
      min-width: 120px;
    }
    #autoscroll-label {
      color: #aaa;
      font-size: 14px;
      user-select: none;
      cursor: pointer;
    }
    .search-highlight {
      background-color: yellow;
      color: black;
      padding: 2px 0;
    }
    .search-highlight.current {
      background-color: orange;
      color: black;
    }
"#;

const SCRIPT: &str = r#"    const video = document.getElementById('player');
    const transcriptDiv = document.querySelector('.transcript');
    const transcriptContainer = document.getElementById('transcript-container');
    const cueSpans = Array.from(document.querySelectorAll('.speakertext'));

    // --- playback synchronization ---
    const autoScrollToggle = document.getElementById('autoscroll-toggle');
    const SCROLL_QUIET_MS = 2000;
    let activeCue = null;
    let userIsScrolling = false;
    let quietTimer = null;
    // counts pending programmatic scrolls so they are not mistaken for the user
    let suppressScroll = 0;

    function scrollProgrammatically(element) {
      suppressScroll += 1;
      element.scrollIntoView({ behavior: 'smooth', block: 'center' });
      setTimeout(() => { suppressScroll = Math.max(0, suppressScroll - 1); }, 1000);
    }

    function setActiveCue(next) {
      if (next === activeCue) return;
      if (activeCue !== null) cueSpans[activeCue].classList.remove('active');
      activeCue = next;
      if (activeCue !== null) {
        cueSpans[activeCue].classList.add('active');
        scrollProgrammatically(cueSpans[activeCue]);
      }
    }

    video.addEventListener('timeupdate', () => {
      if (!autoScrollToggle.checked || userIsScrolling) return;
      const t = video.currentTime;
      let selected = null;
      // scan latest-first: the most recently started cue <= t wins
      for (let i = cueSpans.length - 1; i >= 0; i--) {
        if (parseFloat(cueSpans[i].dataset.time) <= t) { selected = i; break; }
      }
      setActiveCue(selected);
    });

    // nothing is "being spoken" while stopped
    video.addEventListener('pause', () => setActiveCue(null));

    // a seek resumes tracking immediately instead of waiting out the debounce
    video.addEventListener('seeked', () => {
      userIsScrolling = false;
      if (quietTimer !== null) { clearTimeout(quietTimer); quietTimer = null; }
    });

    transcriptContainer.addEventListener('scroll', () => {
      if (!autoScrollToggle.checked || suppressScroll > 0) return;
      userIsScrolling = true;
      if (quietTimer !== null) clearTimeout(quietTimer);
      quietTimer = setTimeout(() => {
        userIsScrolling = false;
        quietTimer = null;
      }, SCROLL_QUIET_MS);
    });

    // --- search ---
    const searchInput = document.getElementById('search-input');
    const prevButton = document.getElementById('prev-button');
    const nextButton = document.getElementById('next-button');
    const searchInfo = document.getElementById('search-info');
    let searchMatches = [];
    let currentMatchIndex = -1;

    function clearHighlights() {
      const highlights = transcriptDiv.querySelectorAll('.search-highlight');
      highlights.forEach(highlight => {
        const parent = highlight.parentNode;
        parent.replaceChild(document.createTextNode(highlight.textContent), highlight);
        parent.normalize();
      });
      searchMatches = [];
      currentMatchIndex = -1;
    }

    function highlightMatches(searchTerm) {
      if (!searchTerm || searchTerm.length < 2) {
        clearHighlights();
        searchInfo.textContent = '';
        prevButton.disabled = true;
        nextButton.disabled = true;
        return;
      }

      clearHighlights();
      // escape the query so every character is literal
      const searchRegex = new RegExp(searchTerm.replace(/[.*+?^${}()|[\]\\]/g, '\\$&'), 'gi');

      cueSpans.forEach(element => {
        const originalText = element.textContent;
        const matches = [...originalText.matchAll(searchRegex)];
        if (matches.length === 0) return;

        let lastIndex = 0;
        const fragment = document.createDocumentFragment();
        matches.forEach(match => {
          if (match.index > lastIndex) {
            fragment.appendChild(document.createTextNode(originalText.substring(lastIndex, match.index)));
          }
          const mark = document.createElement('span');
          mark.className = 'search-highlight';
          mark.textContent = match[0];
          fragment.appendChild(mark);
          searchMatches.push(mark);
          lastIndex = match.index + match[0].length;
        });
        if (lastIndex < originalText.length) {
          fragment.appendChild(document.createTextNode(originalText.substring(lastIndex)));
        }
        element.textContent = '';
        element.appendChild(fragment);
      });

      if (searchMatches.length > 0) {
        currentMatchIndex = 0;
        updateCurrentMatch();
        prevButton.disabled = false;
        nextButton.disabled = false;
      } else {
        searchInfo.textContent = 'No matches';
        prevButton.disabled = true;
        nextButton.disabled = true;
      }
    }

    function updateCurrentMatch() {
      searchMatches.forEach((match, index) => {
        if (index === currentMatchIndex) {
          match.classList.add('current');
          scrollProgrammatically(match);
        } else {
          match.classList.remove('current');
        }
      });
      searchInfo.textContent = `${currentMatchIndex + 1} of ${searchMatches.length}`;
    }

    function nextMatch() {
      if (searchMatches.length > 0) {
        currentMatchIndex = (currentMatchIndex + 1) % searchMatches.length;
        updateCurrentMatch();
      }
    }

    function prevMatch() {
      if (searchMatches.length > 0) {
        currentMatchIndex = (currentMatchIndex - 1 + searchMatches.length) % searchMatches.length;
        updateCurrentMatch();
      }
    }

    searchInput.addEventListener('input', (e) => highlightMatches(e.target.value));
    searchInput.addEventListener('keydown', (e) => {
      if (e.key === 'Enter') {
        if (e.shiftKey) { prevMatch(); } else { nextMatch(); }
      }
    });
    nextButton.addEventListener('click', nextMatch);
    prevButton.addEventListener('click', prevMatch);

    // --- draggable separator ---
    const separator = document.getElementById('separator');
    const videoContainer = document.getElementById('video-container');
    const container = document.querySelector('.container');
    let isDragging = false;

    function startDrag(e) {
      isDragging = true;
      if (e.pointerId) separator.setPointerCapture(e.pointerId);
      e.preventDefault();
    }

    function onDrag(e) {
      if (!isDragging) return;
      let clientY;
      if (e.clientY !== undefined) {
        clientY = e.clientY;
      } else if (e.touches && e.touches.length > 0) {
        clientY = e.touches[0].clientY;
      } else {
        return;
      }
      const containerTop = container.getBoundingClientRect().top;
      let newHeight = clientY - containerTop;
      const minHeight = 100;
      const maxHeight = window.innerHeight - 100;
      newHeight = Math.max(minHeight, Math.min(maxHeight, newHeight));
      videoContainer.style.height = newHeight + 'px';
      e.preventDefault();
    }

    function endDrag(e) {
      isDragging = false;
      if (e.pointerId) separator.releasePointerCapture(e.pointerId);
      e.preventDefault();
    }

    separator.addEventListener('pointerdown', startDrag);
    window.addEventListener('pointermove', onDrag);
    window.addEventListener('pointerup', endDrag);
    separator.addEventListener('touchstart', startDrag, { passive: false });
    window.addEventListener('touchmove', onDrag, { passive: false });
    window.addEventListener('touchend', endDrag, { passive: false });

    // --- click a cue to jump the video there ---
    function handleTimestampEvent(e) {
      e.preventDefault();
      const time = parseFloat(this.getAttribute('data-time'));
      video.currentTime = time;
      video.play();
    }

    document.querySelectorAll('.timestamp, .speakername, .speakertext').forEach(function (element) {
      element.addEventListener('click', handleTimestampEvent);
      element.addEventListener('touchstart', handleTimestampEvent, { passive: false });
    });
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cues::Cue;

    fn run(speaker: &str, start: f64, texts: &[&str]) -> SpeakerRun {
        let mut t = start;
        let cues = texts
            .iter()
            .map(|text| {
                let cue = Cue {
                    speaker: speaker.to_string(),
                    start: t,
                    text: text.to_string(),
                };
                t += 1.0;
                cue
            })
            .collect();
        SpeakerRun {
            speaker: speaker.to_string(),
            start,
            cues,
        }
    }

    #[test]
    fn cue_nodes_carry_machine_readable_times() {
        let page = render_page(&[run("Ada", 1330.66, &["hello"])], "vid.mp4", "T");
        assert!(page.contains("data-time=\"1330.66\""));
        assert!(page.contains("[ 22:10 ]"));
    }

    #[test]
    fn runs_render_as_sections_with_headers() {
        let runs = vec![run("Ada", 0.0, &["one", "two"]), run("Grace", 5.0, &["three"])];
        let page = render_page(&runs, "vid.mp4", "T");
        assert_eq!(page.matches("class=\"speaker-section\"").count(), 2);
        assert_eq!(page.matches("class=\"speakertext\"").count(), 3);
        assert!(page.contains(">Ada</span>"));
        assert!(page.contains(">Grace</span>"));
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let page = render_page(
            &[run("A <b>& co", 0.0, &["1 < 2 \"quoted\""])],
            "https://host/v.mp4?a=1&b=2",
            "Tom & Jerry",
        );
        assert!(page.contains("A &lt;b&gt;&amp; co"));
        assert!(page.contains("1 &lt; 2 &quot;quoted&quot;"));
        assert!(page.contains("<title>Tom &amp; Jerry</title>"));
        assert!(page.contains("src=\"https://host/v.mp4?a=1&amp;b=2\""));
        assert!(!page.contains("<b>&"));
    }

    #[test]
    fn video_source_is_embedded() {
        let page = render_page(&[run("Ada", 0.0, &["x"])], "https://bucket/movie.mp4", "T");
        assert!(page.contains("<source src=\"https://bucket/movie.mp4\""));
    }

    #[test]
    fn empty_speaker_renders_an_empty_label() {
        let page = render_page(&[run("", 3.0, &["unattributed"])], "v.mp4", "T");
        assert!(page.contains("class=\"speakername\" data-time=\"3\"></span>"));
    }
}
