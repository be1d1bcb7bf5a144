mod common;

use scrollyviz::{
    Millis, PieChart, Story, StoryConfig, TABLEAU10, data::ProportionRecord, rasterize, save_png,
    to_svg,
};

fn records(pairs: &[(&str, f64)]) -> Vec<ProportionRecord> {
    pairs
        .iter()
        .map(|(n, v)| ProportionRecord::new(*n, *v))
        .collect()
}

#[test]
fn hidden_then_shown_pie_renders_the_same_frame() {
    let mut pie = PieChart::new("pie-chart", 500.0, 475.0, TABLEAU10.to_vec());
    pie.draw_chart(&records(&[("A", 70.0), ("B", 30.0)]), "A", Millis::ZERO)
        .unwrap()
        .show();
    let before = pie.render(Millis(1000));

    pie.unshow();
    pie.show();
    assert_eq!(pie.render(Millis(1000)), before);
    assert_eq!(pie.percent_text(), "70%");
}

#[test]
fn pie_colors_follow_the_latest_order() {
    let mut pie = PieChart::new("pie-chart", 500.0, 475.0, TABLEAU10.to_vec());
    pie.draw_chart(&records(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]), "A", Millis::ZERO)
        .unwrap();
    pie.draw_chart(&records(&[("C", 3.0), ("A", 1.0), ("B", 2.0)]), "A", Millis(500))
        .unwrap();

    assert_eq!(pie.color_of("C"), Some(TABLEAU10[0]));
    assert_eq!(pie.color_of("A"), Some(TABLEAU10[1]));
    assert_eq!(pie.color_of("B"), Some(TABLEAU10[2]));
}

#[test]
fn pie_scene_svg_is_centered_and_labelled() {
    let mut story = Story::new(StoryConfig::default(), common::full_source()).unwrap();
    story.on_active(2).unwrap();
    story.advance_by(1000);

    let svg = to_svg(&story.render()).unwrap();
    assert!(svg.contains(r#"viewBox="-500 -475 1000 950""#));
    assert!(svg.contains(r#"class="pie-chart""#));
    assert!(svg.contains(">93%</text>"));
    assert!(svg.contains(r#"<tspan class="pie-label-name" y="-0.1em" font-weight="bold">멤버 작사 참여 비율</tspan>"#));
    assert!(svg.contains(r#"class="bts-img" href="images/bts.jpeg""#));
}

#[test]
fn line_scene_svg_has_axis_and_series() {
    let mut story = Story::new(StoryConfig::default(), common::full_source()).unwrap();
    story.on_active(3).unwrap();

    let doc = story.render();
    assert!(doc.find_class("axis").is_some());
    let svg = to_svg(&doc).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 1000 950""#));
    assert_eq!(svg.matches(r#"class="line-series""#).count(), 3);
    assert!(svg.contains(">2018</text>"));
    assert!(svg.contains(r#"<tspan font-weight="bold"> GOT7</tspan>"#));
}

#[test]
fn story_frame_rasterizes_to_png() {
    let mut story = Story::new(StoryConfig::default(), common::full_source()).unwrap();
    story.on_active(1).unwrap();
    story.advance_by(1000);

    let svg = to_svg(&story.render()).unwrap();
    let frame = rasterize(&svg, None).unwrap();
    assert_eq!((frame.width, frame.height), (1000, 950));
    assert!(frame.data.chunks_exact(4).any(|px| px[3] != 0));

    let tmp = common::temp_dir("story_png");
    std::fs::create_dir_all(&tmp).unwrap();
    let out = tmp.join("frame.png");
    save_png(&frame, &out).unwrap();
    assert!(out.exists());
    std::fs::remove_dir_all(&tmp).ok();
}
