use crate::domain::Carousel;
use anyhow::{Context, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

pub const DEFAULT_SLIDE_INTERVAL: Duration = Duration::from_millis(3500);

/// Accent colour taken from the current slide, written `rgb(r, g, b)` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Accent {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Accent {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Accent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                bail!("Expected #rrggbb, got '{}'", s);
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16)
                    .with_context(|| format!("Invalid hex colour '{}'", s))
            };
            return Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let inner = s
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| anyhow!("Expected rgb(r, g, b), got '{}'", s))?;
        let channels = inner
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .with_context(|| format!("Invalid colour channel in '{}'", s))
            })
            .collect::<anyhow::Result<Vec<u8>>>()?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => bail!("Expected three channels in '{}'", s),
        }
    }
}

impl TryFrom<String> for Accent {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Accent> for String {
    fn from(accent: Accent) -> Self {
        accent.to_string()
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub url: String,
    pub title: String,
    pub color: Accent,
}

impl Slide {
    fn builtin(url: &str, title: &str, color: Accent) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            color,
        }
    }
}

pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide::builtin(
            "./images/qishen.jpg",
            "旅行者，快来啊！一起休息一下吧...",
            Accent::new(181, 192, 184),
        ),
        Slide::builtin(
            "./images/wendi.jpg",
            "【温迪】风会带走你的忧虑，也会带来新的故事和冒险~",
            Accent::new(62, 150, 126),
        ),
        Slide::builtin(
            "./images/keqing.jpg",
            "【刻晴】剑光如我,斩尽芜杂!",
            Accent::new(90, 78, 116),
        ),
        Slide::builtin(
            "./images/zhongli.jpg",
            "【钟离】欲买桂花同载酒,只可惜故人何日再见呢？",
            Accent::new(210, 158, 78),
        ),
        Slide::builtin(
            "./images/ganyu.jpg",
            "【甘雨】啊,琉璃百合的味道,真好啊！",
            Accent::new(96, 111, 191),
        ),
        Slide::builtin(
            "./images/leidian.jpg",
            "【影】浮世景色百千年依旧,人之在世却如白露与泡影！",
            Accent::new(153, 119, 217),
        ),
        Slide::builtin(
            "./images/shenzi.jpg",
            "【神子】我的神明，就托付给你了！",
            Accent::new(185, 95, 84),
        ),
        Slide::builtin(
            "./images/naxida.jpg",
            "【纳西妲】你相信草神的存在吗？我曾在梦中见过她",
            Accent::new(130, 148, 124),
        ),
        Slide::builtin(
            "./images/nilu.jpg",
            "【妮露】舞姿娉婷，如睡莲初绽，一尘不染~",
            Accent::new(33, 166, 218),
        ),
        Slide::builtin(
            "./images/funingna.jpg",
            "【芙宁娜】雨露不休，百川奔流!",
            Accent::new(136, 151, 184),
        ),
        Slide::builtin(
            "./images/naweiya.jpg",
            "【娜维娅】和朋友分享的秘密不是更加珍贵吗?",
            Accent::new(202, 159, 116),
        ),
    ]
}

/// Background slider: advances on a fixed interval unless paused.
/// Manual steps restart the interval.
#[derive(Debug, Clone)]
pub struct Slider {
    slides: Carousel<Slide>,
    interval: Duration,
    last_advance: Instant,
    paused: bool,
}

impl Slider {
    pub fn new(slides: Carousel<Slide>, interval: Duration, now: Instant) -> Self {
        Self {
            slides,
            interval,
            last_advance: now,
            paused: false,
        }
    }

    pub fn current(&self) -> &Slide {
        self.slides.current()
    }

    pub fn index(&self) -> usize {
        self.slides.index()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// The clock header is hidden while the first slide is showing.
    pub fn shows_clock(&self) -> bool {
        self.slides.index() != 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances when the interval has elapsed. Returns whether the slide changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.paused || now.saturating_duration_since(self.last_advance) < self.interval {
            return false;
        }
        self.slides.next();
        self.last_advance = now;
        log::trace!("Slider advanced to slide {}", self.slides.index());
        true
    }

    pub fn next(&mut self, now: Instant) {
        self.slides.next();
        self.last_advance = now;
    }

    pub fn previous(&mut self, now: Instant) {
        self.slides.previous();
        self.last_advance = now;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last_advance = now;
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        if self.paused {
            self.resume(now);
        } else {
            self.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(now: Instant) -> Slider {
        let slides = Carousel::new(default_slides()).unwrap();
        Slider::new(slides, DEFAULT_SLIDE_INTERVAL, now)
    }

    #[test]
    fn parses_rgb_and_hex_accents() {
        assert_eq!(
            "rgb(181, 192, 184)".parse::<Accent>().unwrap(),
            Accent::new(181, 192, 184)
        );
        assert_eq!("#3e967e".parse::<Accent>().unwrap(), Accent::new(62, 150, 126));
        assert!("rgb(1, 2)".parse::<Accent>().is_err());
        assert!("rgb(1, 2, 300)".parse::<Accent>().is_err());
        assert!("blue".parse::<Accent>().is_err());
    }

    #[test]
    fn slides_deserialize_from_json() {
        let json = r#"[{"url": "./images/a.jpg", "title": "A", "color": "rgb(1, 2, 3)"}]"#;
        let slides: Vec<Slide> = serde_json::from_str(json).unwrap();
        assert_eq!(slides[0].color, Accent::new(1, 2, 3));

        let bad = r#"[{"url": "x", "title": "A", "color": "nope"}]"#;
        assert!(serde_json::from_str::<Vec<Slide>>(bad).is_err());
    }

    #[test]
    fn advances_after_interval() {
        let t0 = Instant::now();
        let mut slider = slider(t0);
        assert!(!slider.shows_clock());
        assert!(!slider.tick(t0 + Duration::from_millis(3499)));
        assert!(slider.tick(t0 + DEFAULT_SLIDE_INTERVAL));
        assert_eq!(slider.index(), 1);
        assert!(slider.shows_clock());
    }

    #[test]
    fn manual_step_restarts_interval() {
        let t0 = Instant::now();
        let mut slider = slider(t0);
        slider.previous(t0 + Duration::from_millis(3000));
        assert_eq!(slider.index(), slider.len() - 1);
        assert!(!slider.tick(t0 + Duration::from_millis(4000)));
        assert!(slider.tick(t0 + Duration::from_millis(6500)));
        assert_eq!(slider.index(), 0);
    }

    #[test]
    fn paused_slider_holds_its_slide() {
        let t0 = Instant::now();
        let mut slider = slider(t0);
        slider.toggle_pause(t0);
        assert!(slider.is_paused());
        assert!(!slider.tick(t0 + Duration::from_secs(60)));

        let resumed_at = t0 + Duration::from_secs(61);
        slider.toggle_pause(resumed_at);
        assert!(!slider.tick(resumed_at + Duration::from_millis(100)));
        assert!(slider.tick(resumed_at + DEFAULT_SLIDE_INTERVAL));
    }
}
