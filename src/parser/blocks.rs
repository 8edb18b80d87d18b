use tracing::warn;

use crate::dom::Node;
use crate::images::ImageSink;
use crate::parser::markup::extract_markup;
use crate::schema::{Graf, GrafType, Image};
use crate::text::{preformatted_text, rendered_text};

/// Marker carried by every block-level candidate.
pub const GRAF_CLASS: &str = "graf";

#[derive(Debug, Clone, Copy)]
enum Content {
    /// Normalized text plus inline markup spans.
    Markup,
    /// Normalized text only.
    Text,
    Preformatted,
    Image,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Block(GrafType, Content),
    Skip,
}

/// Checked top to bottom; the first class present on the element decides.
/// Reordering changes results for elements carrying several of these.
const RULES: &[(&str, Rule)] = &[
    ("graf--h1", Rule::Block(GrafType::H1, Content::Markup)),
    ("graf--h2", Rule::Block(GrafType::H2, Content::Markup)),
    ("graf--h3", Rule::Block(GrafType::H3, Content::Markup)),
    ("graf--h4", Rule::Block(GrafType::H4, Content::Markup)),
    ("graf--blockquote", Rule::Block(GrafType::Blockquote, Content::Markup)),
    ("graf--pullquote", Rule::Block(GrafType::Blockquote, Content::Markup)),
    ("graf--p", Rule::Block(GrafType::Paragraph, Content::Markup)),
    ("graf--figure", Rule::Block(GrafType::Image, Content::Image)),
    ("graf--mixtapeEmbed", Rule::Block(GrafType::Embed, Content::Text)),
    ("graf--pre", Rule::Block(GrafType::Preformatted, Content::Preformatted)),
    ("graf--empty", Rule::Skip),
];

/// Classify one `graf` element. Unknown and empty grafs yield `None`.
pub fn classify_block(el: &Node, images: &dyn ImageSink) -> Option<Graf> {
    let Some((_, rule)) = RULES.iter().find(|(class, _)| el.has_class(class)) else {
        warn!(class = el.attr("class").unwrap_or_default(), "unknown graf type, skipping");
        return None;
    };

    let Rule::Block(kind, content) = *rule else {
        return None;
    };

    let mut graf = Graf {
        kind,
        name: el.attr("name").unwrap_or_default().to_string(),
        text: None,
        image: None,
        markups: Vec::new(),
    };

    match content {
        Content::Markup => {
            let (text, markups) = extract_markup(el);
            graf.text = Some(text);
            graf.markups = markups;
        }
        Content::Text => graf.text = Some(rendered_text(el)),
        Content::Preformatted => graf.text = Some(preformatted_text(el)),
        Content::Image => {
            graf.image = extract_image(el);
            if let Some(id) = graf.image.as_ref().and_then(|img| img.id.as_deref()) {
                images.register(id);
            }
        }
    }

    Some(graf)
}

/// Classify the direct `graf` children of `container`, in order.
pub fn classify_children(container: &Node, images: &dyn ImageSink) -> Vec<Graf> {
    container
        .child_elements()
        .filter(|c| c.has_class(GRAF_CLASS))
        .filter_map(|g| classify_block(g, images))
        .collect()
}

/// Descriptor from the first direct `img` child, if there is one.
pub fn extract_image(el: &Node) -> Option<Image> {
    let img = el.first_child_element("img")?;
    let attr = |name| img.attr(name).filter(|v| !v.is_empty()).map(str::to_string);

    Some(Image {
        id: attr("data-image-id"),
        source: attr("src"),
        alt: attr("alt"),
        width: attr("data-width"),
        height: attr("data-height"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::images::{ImageQueue, NoImages};
    use crate::schema::{Markup, MarkupType};

    fn grafs(html: &str) -> Vec<Graf> {
        let root = parse(html.as_bytes()).unwrap();
        let body = root.outermost(&|n| n.is_element("body"));
        classify_children(body[0], &NoImages)
    }

    #[test]
    fn paragraph_with_markup() {
        let g = grafs(r#"<p name="d3f1" class="graf graf--p">The <em>owls</em> are not what <strong><em>they seem</em></strong></p>"#);
        assert_eq!(g.len(), 1);
        assert_eq!(g[0].kind, GrafType::Paragraph);
        assert_eq!(g[0].name, "d3f1");
        assert_eq!(g[0].text.as_deref(), Some("The owls are not what they seem"));
        assert_eq!(
            g[0].markups,
            vec![
                Markup::new(MarkupType::Emphasis, 4, 8),
                Markup::new(MarkupType::Strong, 22, 31),
                Markup::new(MarkupType::Emphasis, 22, 31),
            ]
        );
    }

    #[test]
    fn headings_and_quotes() {
        let g = grafs(concat!(
            r#"<h3 class="graf graf--h3">Title</h3>"#,
            r#"<h4 class="graf graf--h4">Sub</h4>"#,
            r#"<blockquote class="graf graf--blockquote">Q1</blockquote>"#,
            r#"<blockquote class="graf graf--pullquote">Q2</blockquote>"#,
        ));
        let kinds: Vec<GrafType> = g.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![GrafType::H3, GrafType::H4, GrafType::Blockquote, GrafType::Blockquote]
        );
    }

    #[test]
    fn first_matching_class_wins() {
        let g = grafs(r#"<p class="graf graf--p graf--h2">Both</p>"#);
        assert_eq!(g[0].kind, GrafType::H2);
    }

    #[test]
    fn figure_descriptor() {
        let g = grafs(r#"<p class="graf graf--figure"><img data-image-id="x" data-width="10" data-height="20" src="s.png"></p>"#);
        assert_eq!(g[0].kind, GrafType::Image);
        assert_eq!(g[0].text, None);
        assert!(g[0].markups.is_empty());
        assert_eq!(
            g[0].image,
            Some(Image {
                id: Some("x".into()),
                source: Some("s.png".into()),
                alt: None,
                width: Some("10".into()),
                height: Some("20".into()),
            })
        );
    }

    #[test]
    fn figure_without_img_is_kept() {
        let g = grafs(r#"<figure class="graf graf--figure"><figcaption>cap</figcaption></figure>"#);
        assert_eq!(g.len(), 1);
        assert_eq!(g[0].image, None);
    }

    #[test]
    fn figure_registers_image() {
        let root = parse(br#"<figure class="graf graf--figure"><img data-image-id="1*abc.png" src="x"></figure>"#).unwrap();
        let body = root.outermost(&|n| n.is_element("body"));
        let queue = ImageQueue::default();
        classify_children(body[0], &queue);
        assert_eq!(queue.into_ids(), vec!["1*abc.png".to_string()]);
    }

    #[test]
    fn embed_is_plain_text() {
        let g = grafs(r#"<div class="graf graf--mixtapeEmbed"><a href="https://x"><strong>Card</strong> <em>desc</em></a></div>"#);
        assert_eq!(g[0].kind, GrafType::Embed);
        assert_eq!(g[0].text.as_deref(), Some("Card desc"));
        assert!(g[0].markups.is_empty());
    }

    #[test]
    fn pre_keeps_whitespace() {
        let g = grafs(r#"<pre class="graf graf--pre">let x  = 1;<br>let y = 2;</pre>"#);
        assert_eq!(g[0].kind, GrafType::Preformatted);
        assert_eq!(g[0].text.as_deref(), Some("let x  = 1;\nlet y = 2;"));
    }

    #[test]
    fn empty_and_unknown_are_dropped() {
        let g = grafs(concat!(
            r#"<p class="graf graf--empty"><br></p>"#,
            r#"<p class="graf graf--mystery">??</p>"#,
            r#"<p class="not-a-graf graf--p">no marker</p>"#,
            r#"<p class="graf graf--p">kept</p>"#,
        ));
        assert_eq!(g.len(), 1);
        assert_eq!(g[0].text.as_deref(), Some("kept"));
    }
}
