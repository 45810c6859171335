// src/render.rs
//! HTML output: the public listing page and the newsletter snippet.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write as _;

use crate::curation::CuratedDigest;
use crate::feeds::{FeedListing, SourceFeed};

/// Listing page. Every story row carries a hidden `api_id` and a `rank` box so the
/// form submits parallel lists to `/id_list`.
pub fn feeds_page(listing: &FeedListing) -> String {
    let mut out = String::with_capacity(64 * 1024);
    out.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>News Link</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n\
         <h1>News Link</h1>\n\
         <form action=\"/id_list\" method=\"get\">\n\
         <p class=\"help\">Number the stories to include, lowest first, then build the snippet.</p>\n",
    );
    for section in listing.sections() {
        write_section(&mut out, section);
    }
    out.push_str("<button type=\"submit\">Build snippet</button>\n</form>\n</body>\n</html>\n");
    out
}

fn write_section(out: &mut String, feed: &SourceFeed) {
    let _ = writeln!(
        out,
        "<section class=\"feed\" id=\"feed-{}\">\n<h2>{}</h2>",
        attr(&feed.source.id),
        text(&feed.source.name)
    );
    if feed.stories.is_empty() {
        out.push_str("<p class=\"empty\">No stories.</p>\n");
    }
    for story in feed.stories.values() {
        let _ = writeln!(
            out,
            "<article class=\"story\">\n\
             <input type=\"hidden\" name=\"api_id\" value=\"{id}\">\n\
             <input type=\"text\" name=\"rank\" size=\"2\" aria-label=\"rank\">\n\
             <img src=\"{image}\" alt=\"\" width=\"100\">\n\
             <h3><a href=\"{url}\">{title}</a></h3>\n\
             <p class=\"meta\">{byline} | {date}</p>\n\
             <p class=\"teaser\">{teaser}</p>\n\
             </article>",
            id = attr(&story.id),
            image = attr(&story.image),
            url = attr(&story.url),
            title = text(&story.title),
            byline = text(&story.byline),
            date = text(&story.date),
            teaser = text(&story.teaser),
        );
    }
    out.push_str("</section>\n");
}

/// Newsletter snippet meant to be pasted into the mail tool. The teaser is
/// already normalized markup and goes in unescaped.
pub fn newsletter_snippet(digest: &CuratedDigest) -> String {
    let mut out = String::with_capacity(8 * 1024);
    let _ = writeln!(
        out,
        "<table width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\">\n\
         <tr><td class=\"post-date\"><strong>{}</strong></td></tr>",
        text(&digest.post_date)
    );
    for story in digest.stories.values() {
        let _ = writeln!(
            out,
            "<tr><td class=\"story\" data-id=\"{id}\">\n\
             <h2><a href=\"{url}\">{title}</a></h2>\n\
             <p class=\"byline\">{byline}</p>\n\
             {teaser}\
             <p><a href=\"{url}\">Read more</a></p>\n\
             </td></tr>",
            id = attr(&story.id),
            url = attr(&story.url),
            title = text(&story.title),
            byline = text(&story.byline),
            teaser = story.teaser,
        );
    }
    out.push_str("</table>\n");
    out
}
