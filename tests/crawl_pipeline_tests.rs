//! End-to-end crawl and export behavior against a scripted page source
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use top250_crawler::infrastructure::config::CrawlerConfig;
use top250_crawler::infrastructure::crawling::{PageOutcome, PageSource, Top250Crawler};
use top250_crawler::infrastructure::csv_export::{CsvExporter, UTF8_BOM};
use top250_crawler::infrastructure::parsing::MovieListParser;
use top250_crawler::infrastructure::simple_http_client::FetchError;
use top250_crawler::{MovieRecord, MovieRow};

/// Full chart of 250 entries; selected offsets can fail or come back empty
#[derive(Clone, Default)]
struct SimulatedChart {
    failing: HashSet<u32>,
    empty: HashSet<u32>,
    requested: Arc<Mutex<Vec<u32>>>,
}

impl SimulatedChart {
    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for SimulatedChart {
    async fn fetch_page(&self, offset: u32) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(offset);
        if self.failing.contains(&offset) {
            return Err(FetchError::Status {
                status: 502,
                url: format!("https://movie.douban.com/top250?start={offset}"),
            });
        }
        if self.empty.contains(&offset) {
            return Ok("<html><body><p>sec.douban.com</p></body></html>".to_string());
        }
        Ok(chart_page(offset))
    }
}

fn chart_entry(rank: u32) -> String {
    let quote = if rank % 7 == 0 {
        String::new()
    } else {
        format!(r#"<p class="quote"><span class="inq">第{rank}名的简评</span></p>"#)
    };
    format!(
        r#"<li><div class="item">
            <div class="pic"><em>{rank}</em></div>
            <div class="info">
              <div class="hd"><a href="https://movie.douban.com/subject/{rank}/">
                <span class="title">电影{rank}</span>
                <span class="title">&nbsp;/&nbsp;Movie {rank}</span>
                <span class="other">&nbsp;/&nbsp;别名{rank}</span>
              </a></div>
              <div class="bd">
                <p class="">导演: 导演{rank}&nbsp;&nbsp;&nbsp;主演: 演员{rank}<br>
                  {year}&nbsp;/&nbsp;美国 英国&nbsp;/&nbsp;剧情 爱情</p>
                <div class="star">
                  <span class="rating45-t"></span>
                  <span class="rating_num" property="v:average">{rating}</span>
                  <span property="v:best" content="10.0"></span>
                  <span>{count}人评价</span>
                </div>
                {quote}
              </div>
            </div>
          </div></li>"#,
        year = 1950 + rank % 70,
        rating = format!("{:.1}", 9.9 - f64::from(rank % 15) / 10.0),
        count = format_thousands(1_000_000 + rank * 1_234),
    )
}

fn format_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn chart_page(offset: u32) -> String {
    let entries: String = (offset + 1..=offset + 25).map(chart_entry).collect();
    format!(r#"<html><body><div id="content"><ol class="grid_view">{entries}</ol></div></body></html>"#)
}

fn crawler(source: SimulatedChart) -> Top250Crawler<SimulatedChart> {
    Top250Crawler::new(source, MovieListParser::new().unwrap(), CrawlerConfig::default())
}

#[tokio::test(start_paused = true)]
async fn full_chart_yields_250_records_in_rank_order() {
    let source = SimulatedChart::default();
    let outcome = crawler(source.clone()).fetch_all().await;

    assert_eq!(outcome.records.len(), 250);
    assert_eq!(source.requested(), (0..250).step_by(25).collect::<Vec<u32>>());
    assert_eq!(outcome.records[0].title, "电影1 / /\u{a0}Movie 1");
    assert_eq!(outcome.records[249].title, "电影250 / /\u{a0}Movie 250");

    let first = &outcome.records[0];
    assert_eq!(first.year, "1951");
    assert_eq!(first.tail, "美国 英国 / 剧情 爱情");
    assert_eq!(first.num_ratings, "1001234");
    assert_eq!(first.quote, "第1名的简评");

    // Entries without a quote keep every other field
    let seventh = &outcome.records[6];
    assert_eq!(seventh.quote, "");
    assert_eq!(seventh.year, "1957");
    assert!(!seventh.rating.is_empty());
}

#[tokio::test(start_paused = true)]
async fn empty_sixth_page_stops_after_125_records() {
    let source = SimulatedChart {
        empty: HashSet::from([125]),
        ..Default::default()
    };
    let outcome = crawler(source.clone()).fetch_all().await;

    assert_eq!(outcome.records.len(), 125);
    assert!(outcome.summary.stopped_early);
    assert_eq!(source.requested(), vec![0, 25, 50, 75, 100, 125]);
    assert_eq!(outcome.records.last().unwrap().title, "电影125 / /\u{a0}Movie 125");
}

#[tokio::test(start_paused = true)]
async fn failed_third_page_yields_225_records() {
    let source = SimulatedChart {
        failing: HashSet::from([50]),
        ..Default::default()
    };
    let outcome = crawler(source.clone()).fetch_all().await;

    assert_eq!(outcome.records.len(), 225);
    assert!(!outcome.summary.stopped_early);
    assert_eq!(outcome.summary.failed_offsets(), vec![50]);
    assert_eq!(outcome.summary.pages[2], (50, PageOutcome::Failed));
    assert_eq!(source.requested().len(), 10);
    assert!(!outcome.records.iter().any(|r| r.title.starts_with("电影51 ")));
}

#[tokio::test(start_paused = true)]
async fn exported_csv_reads_back_with_same_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("douban_top250_raw.csv");

    let outcome = crawler(SimulatedChart::default()).fetch_all().await;
    let mut records = outcome.records;
    records[3].rating = "暂无".to_string();
    records[4].num_ratings = String::new();

    let written = CsvExporter::new().write(&records, &path).unwrap();
    assert_eq!(written, 250);

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));

    let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["title", "original_title", "info_text", "year", "tail", "rating", "num_ratings", "quote"]
    );

    let rows: Vec<MovieRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(row, &MovieRow::from(record));
    }
    assert_eq!(rows[3].rating, None);
    assert_eq!(rows[4].num_ratings, None);
    assert_eq!(rows[0].rating, Some(9.8));
}

#[test]
fn rating_text_is_written_as_float() {
    let record = MovieRecord {
        rating: "8.7".to_string(),
        ..Default::default()
    };
    let mut buf = Vec::new();
    CsvExporter::new().write_to(&[record], &mut buf).unwrap();

    let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
    assert_eq!(text.lines().nth(1), Some(",,,,,8.7,,"));
}
