//! Banner composition and export.
//!
//! The banner is an SVG document filled from an embedded template. Remote
//! images are downloaded, checked and inlined as data URIs before rendering,
//! so a broken image fails the export instead of leaving a blank hole.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use reqwest::Client;
use thiserror::Error;
use tiny_skia::{Color, Pixmap, Transform};
use tokio::fs;
use tracing::{debug, error, info, trace};
use usvg::fontdb::Database;
use usvg::{Options, Tree};

use crate::config::Config;
use crate::error::AppError;
use crate::search::SummonerProfile;

mod style;

pub use style::{RankStyle, rank_style, win_rate};

const SVG_TEMPLATE: &str = include_str!("../../assets/banner_template.svg");

/// Output pixels per template unit.
const PIXEL_RATIO: f32 = 2.0;

/// Behind the rounded corners when the output has no alpha channel.
const OPAQUE_BACKDROP: (u8, u8, u8) = (11, 16, 32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless.
    Png,
    /// Lossy, quality in `1..=100`.
    Jpeg { quality: u8 },
}

impl ExportFormat {
    pub fn jpeg(quality: u8) -> Self {
        Self::Jpeg {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

pub struct BannerRequest<'a> {
    pub profile: &'a SummonerProfile,
    /// Used unless the profile carries its own banner.
    pub background_url: Option<&'a str>,
    pub format: ExportFormat,
}

/// Lower level causes of a failed export. Logged, never returned.
#[derive(Debug, Error)]
enum ExportFault {
    #[error("request for image {url} failed: {source}")]
    ImageRequest { url: String, source: reqwest::Error },

    #[error("image {url} answered with status {status}")]
    ImageStatus { url: String, status: u16 },

    #[error("image {url} did not load within {timeout:?}")]
    ImageTimeout { url: String, timeout: Duration },

    #[error("image {url} could not be decoded: {source}")]
    ImageDecode { url: String, source: image::ImageError },

    #[error("inline image rejected: {0}")]
    DataUri(&'static str),

    #[error("failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("failed to create pixmap")]
    Pixmap,

    #[error("failed to encode PNG: {0}")]
    Png(String),

    #[error("failed to encode JPEG: {0}")]
    Jpeg(image::ImageError),

    #[error("failed to write banner file: {0}")]
    Io(#[from] std::io::Error),
}

pub struct BannerRenderer {
    http: Client,
    fontdb: Arc<Database>,
    image_timeout: Duration,
}

impl BannerRenderer {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(concat!("summoner-banner/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Load system fonts
        let mut fontdb = Database::new();
        fontdb.load_system_fonts();
        debug!(font_count = fontdb.len(), "🖼️ Loaded system fonts");

        Ok(Self {
            http,
            fontdb: Arc::new(fontdb),
            image_timeout: config.image_timeout,
        })
    }

    /// Renders the banner into encoded image bytes.
    pub async fn render(&self, request: &BannerRequest<'_>) -> Result<Vec<u8>, AppError> {
        self.try_render(request).await.map_err(|fault| {
            error!(error = %fault, "🖼️ ❌ Banner rendering failed");
            AppError::ExportFailed
        })
    }

    /// Renders the banner and saves it in `out_dir` under [`banner_filename`].
    ///
    /// The bytes go to a `.part` file first, renamed once complete; the partial
    /// file never outlives a failure.
    pub async fn export(
        &self,
        request: &BannerRequest<'_>,
        out_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        let profile = request.profile;
        let target = out_dir.join(banner_filename(
            &profile.name,
            profile.tag_line.as_deref(),
            request.format,
        ));

        let outcome = async {
            let bytes = self.try_render(request).await?;
            fs::create_dir_all(out_dir).await?;
            write_atomically(&target, &bytes).await?;
            Ok::<usize, ExportFault>(bytes.len())
        }
        .await;

        match outcome {
            Ok(size) => {
                info!(path = %target.display(), size, "🖼️ ✅ Banner exported");
                Ok(target)
            }
            Err(fault) => {
                error!(error = %fault, path = %target.display(), "🖼️ ❌ Banner export failed");
                Err(AppError::ExportFailed)
            }
        }
    }

    async fn try_render(&self, request: &BannerRequest<'_>) -> Result<Vec<u8>, ExportFault> {
        let profile = request.profile;
        let background_url = profile.banner_url.as_deref().or(request.background_url);

        let (background, avatar) = tokio::try_join!(
            self.inline_optional(background_url),
            self.inline_optional(profile.profile_icon_url.as_deref()),
        )?;

        let svg = compose_svg(profile, background.as_deref(), avatar.as_deref());
        self.rasterize(&svg, request.format)
    }

    async fn inline_optional(&self, url: Option<&str>) -> Result<Option<String>, ExportFault> {
        match url {
            Some(url) => self.inline_image(url).await.map(Some),
            None => Ok(None),
        }
    }

    /// Downloads an image, or unpacks an inline one, and returns it as a
    /// validated data URI.
    async fn inline_image(&self, url: &str) -> Result<String, ExportFault> {
        let (label, bytes) = match url.strip_prefix("data:") {
            Some(inline) => ("inline data URI", decode_data_uri(inline)?),
            None => (url, self.fetch_image(url).await?),
        };

        // resvg skips images it cannot decode, which would export a hole.
        let decode_error = |source| ExportFault::ImageDecode {
            url: label.to_string(),
            source,
        };
        let format = image::guess_format(&bytes).map_err(decode_error)?;
        image::load_from_memory_with_format(&bytes, format).map_err(decode_error)?;

        let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
        Ok(format!("data:{};base64,{}", format.to_mime_type(), b64))
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ExportFault> {
        trace!(url, "🖼️ Fetching image");
        let fetch = async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|source| ExportFault::ImageRequest {
                    url: url.to_string(),
                    source,
                })?;

            if !response.status().is_success() {
                return Err(ExportFault::ImageStatus {
                    url: url.to_string(),
                    status: response.status().as_u16(),
                });
            }

            response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|source| ExportFault::ImageRequest {
                    url: url.to_string(),
                    source,
                })
        };

        tokio::time::timeout(self.image_timeout, fetch)
            .await
            .map_err(|_| ExportFault::ImageTimeout {
                url: url.to_string(),
                timeout: self.image_timeout,
            })?
    }

    fn rasterize(
        &self,
        svg_content: &str,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ExportFault> {
        let options = Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };

        let tree = Tree::from_str(svg_content, &options)?;

        let size = tree.size();
        let width = (size.width() * PIXEL_RATIO).ceil() as u32;
        let height = (size.height() * PIXEL_RATIO).ceil() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or(ExportFault::Pixmap)?;

        if matches!(format, ExportFormat::Jpeg { .. }) {
            let (r, g, b) = OPAQUE_BACKDROP;
            pixmap.fill(Color::from_rgba8(r, g, b, 255));
        }

        resvg::render(
            &tree,
            Transform::from_scale(PIXEL_RATIO, PIXEL_RATIO),
            &mut pixmap.as_mut(),
        );

        let data = match format {
            ExportFormat::Png => pixmap
                .encode_png()
                .map_err(|e| ExportFault::Png(e.to_string()))?,
            ExportFormat::Jpeg { quality } => encode_jpeg(&pixmap, quality)?,
        };

        debug!(width, height, size = data.len(), "🖼️ Banner rasterized");
        Ok(data)
    }
}

fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> Result<Vec<u8>, ExportFault> {
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgb.extend_from_slice(&[color.red(), color.green(), color.blue()]);
    }

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(&rgb, pixmap.width(), pixmap.height(), ExtendedColorType::Rgb8)
        .map_err(ExportFault::Jpeg)?;

    Ok(out)
}

/// Payload of a `data:` URL (prefix already stripped). Only base64 payloads
/// are accepted.
fn decode_data_uri(inline: &str) -> Result<Vec<u8>, ExportFault> {
    let (header, payload) = inline
        .split_once(',')
        .ok_or(ExportFault::DataUri("missing payload"))?;
    if !header.ends_with(";base64") {
        return Err(ExportFault::DataUri("payload is not base64"));
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| ExportFault::DataUri("invalid base64"))
}

async fn write_atomically(target: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let mut partial = target.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let written = match fs::write(&partial, bytes).await {
        Ok(()) => fs::rename(&partial, target).await,
        Err(e) => Err(e),
    };

    if written.is_err() {
        let _ = fs::remove_file(&partial).await;
    }

    written
}

/// `{name}[_{tag}]_banner.{ext}`, every char outside `[A-Za-z0-9]` replaced by `_`.
pub fn banner_filename(name: &str, tag_line: Option<&str>, format: ExportFormat) -> String {
    let sanitize = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };

    let tag = tag_line
        .map(|tag| format!("_{}", sanitize(tag)))
        .unwrap_or_default();

    format!("{}{}_banner.{}", sanitize(name), tag, format.extension())
}

/// Fills the template for `profile`. Image arguments must be data URIs.
fn compose_svg(
    profile: &SummonerProfile,
    background: Option<&str>,
    avatar: Option<&str>,
) -> String {
    let style = rank_style(&profile.tier);
    let tier_label = format!("{} {}", profile.tier, profile.rank);
    let avatar_letter = profile
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_default();
    let win_rate_label = if profile.wins > 0 || profile.losses > 0 {
        format!("{}% de victoires", win_rate(profile.wins, profile.losses))
    } else {
        String::new()
    };

    let mut svg = handle_conditional_block(SVG_TEMPLATE, "background", background.is_some());
    svg = handle_conditional_block(&svg, "placeholder", background.is_none());
    svg = handle_conditional_block(&svg, "avatar", avatar.is_some());
    svg = handle_conditional_block(&svg, "avatar_fallback", avatar.is_none());

    let display_name = escape_xml(&profile.display_name());
    let tier_label = escape_xml(tier_label.trim());
    let avatar_letter = escape_xml(&avatar_letter);
    let league_points = profile.league_points.to_string();
    let wins = profile.wins.to_string();
    let losses = profile.losses.to_string();

    fill_placeholders(
        &svg,
        &[
            ("background_image", background.unwrap_or_default()),
            ("avatar_image", avatar.unwrap_or_default()),
            ("avatar_letter", avatar_letter.as_str()),
            ("display_name", display_name.as_str()),
            ("tier_label", tier_label.as_str()),
            ("tier_color", style.text_color),
            ("border_color", style.border_color),
            ("glow_color", style.glow_color),
            ("win_rate", win_rate_label.as_str()),
            ("league_points", league_points.as_str()),
            ("wins", wins.as_str()),
            ("losses", losses.as_str()),
        ],
    )
}

/// Replaces every `{{key}}` in one pass; inserted values are never rescanned.
/// Unknown keys are left as they are.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Handle mustache-like conditional blocks: {{#name}}content{{/name}}
fn handle_conditional_block(svg: &str, name: &str, show: bool) -> String {
    let tag_open = format!("{{{{#{}}}}}", name);
    let tag_close = format!("{{{{/{}}}}}", name);

    if show {
        // Keep content, remove tags
        svg.replace(&tag_open, "").replace(&tag_close, "")
    } else {
        // Remove entire block
        let mut result = svg.to_string();
        if let (Some(start), Some(end)) = (result.find(&tag_open), result.find(&tag_close)) {
            let end_with_tag = end + tag_close.len();
            result.replace_range(start..end_with_tag, "");
        }
        result
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> SummonerProfile {
        SummonerProfile {
            name: "Fäker <3".into(),
            tag_line: Some("KR1".into()),
            tier: "Challenger".into(),
            rank: "I".into(),
            league_points: 1234,
            wins: 999,
            losses: 123,
            profile_icon_url: None,
            banner_url: None,
        }
    }

    #[test]
    fn filenames_replace_every_special_character() {
        assert_eq!(
            banner_filename("Fäker", Some("EUW1"), ExportFormat::Png),
            "F_ker_EUW1_banner.png"
        );
        assert_eq!(
            banner_filename("Le Conservateur", None, ExportFormat::jpeg(80)),
            "Le_Conservateur_banner.jpg"
        );
    }

    #[test]
    fn jpeg_quality_is_clamped() {
        assert_eq!(ExportFormat::jpeg(0), ExportFormat::Jpeg { quality: 1 });
        assert_eq!(ExportFormat::jpeg(250), ExportFormat::Jpeg { quality: 100 });
    }

    #[test]
    fn conditional_blocks_are_kept_or_removed() {
        let svg = "<a/>{{#x}}<b/>{{/x}}<c/>";
        assert_eq!(handle_conditional_block(svg, "x", true), "<a/><b/><c/>");
        assert_eq!(handle_conditional_block(svg, "x", false), "<a/><c/>");
    }

    #[test]
    fn composed_svg_escapes_text_and_drops_unused_blocks() {
        let svg = compose_svg(&profile(), None, None);

        assert!(svg.contains("Fäker &lt;3 #KR1"));
        assert!(svg.contains("Challenger I"));
        assert!(svg.contains("89% de victoires"));
        assert!(svg.contains("stroke=\"rgba(59, 130, 246, 0.5)\""));
        assert!(svg.contains("fill=\"url(#placeholderGradient)\""));
        assert!(!svg.contains("{{"));
        assert!(!svg.contains("xlink:href=\"\""));
    }

    #[test]
    fn composed_svg_embeds_images() {
        let svg = compose_svg(
            &profile(),
            Some("data:image/jpeg;base64,AAAA"),
            Some("data:image/png;base64,BBBB"),
        );

        assert!(svg.contains("xlink:href=\"data:image/jpeg;base64,AAAA\""));
        assert!(svg.contains("xlink:href=\"data:image/png;base64,BBBB\""));
        assert!(!svg.contains("fill=\"url(#placeholderGradient)\""));
        assert!(!svg.contains("{{avatar_letter}}"));
    }

    #[test]
    fn placeholders_inside_values_are_not_expanded() {
        let mut profile = profile();
        profile.name = "{{wins}}".into();
        profile.tag_line = Some("{{tier_label}}".into());

        let svg = compose_svg(&profile, None, None);

        assert!(svg.contains(">{{wins}} #{{tier_label}}</text>"));
        assert!(svg.contains(">999</text>"));
    }

    #[test]
    fn fill_placeholders_is_single_pass() {
        assert_eq!(
            fill_placeholders("{{a}}-{{b}}-{{c}}-{{", &[("a", "{{b}}"), ("b", "2")]),
            "{{b}}-2-{{c}}-{{"
        );
    }

    #[test]
    fn escaping_covers_markup() {
        assert_eq!(escape_xml("a&b<c>\"'"), "a&amp;b&lt;c&gt;&quot;&apos;");
    }
}
