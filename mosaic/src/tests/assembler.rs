// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::{
    testing, DeckLinkMode, Endpoint, GraphError, GridShape, NodeKind, NodeName, Position, Size,
    SourceDescriptor, SourceId, SourceLocator, SourceSpec, HIGHLIGHT_INSET,
};

fn endpoint(node: &str, pad: &str) -> Endpoint {
    let (owner, role) = node.split_once(':').unwrap();
    Endpoint {
        node: NodeName::new(owner, role),
        pad: pad.to_owned(),
    }
}

#[tokio::test]
async fn two_sources_in_the_mosaic() {
    testing::init();

    let mut assembler = testing::topology_assembler(Size::MONITOR);
    let sources = assembler
        .discover(testing::test_specs(2))
        .collect::<anyhow::Result<Vec<_>>>()
        .unwrap();
    let assembled = assembler.assemble(sources).await.unwrap();

    assert_eq!(assembled.shape(), GridShape { columns: 2, rows: 1 });
    let ids: Vec<&str> = assembled
        .placements()
        .iter()
        .map(|(id, _)| id.as_str())
        .collect();
    assert_eq!(ids, vec!["cam0", "cam1"]);

    let graph = assembled.graph();

    // background first, then the sources in input order
    let background = endpoint("mosaic:compositor", "sink_0");
    assert_eq!(graph.position(&background), Some(Position::ORIGIN));
    assert_eq!(
        graph.peer(&background),
        Some(&endpoint("mosaic:background-caps", "src"))
    );

    for (cam, pad, position) in [
        ("cam0", "sink_1", Position { x: 0, y: 144 }),
        ("cam1", "sink_2", Position { x: 512, y: 144 }),
    ] {
        let input = endpoint("mosaic:compositor", pad);
        assert_eq!(graph.position(&input), Some(position));
        assert_eq!(
            graph.peer(&input),
            Some(&endpoint(&format!("{cam}:preview-out"), "src"))
        );

        let caps = graph.node(&format!("{cam}:preview-caps")).unwrap();
        assert!(matches!(
            &caps.kind,
            NodeKind::CapsFilter(caps) if caps.size == Size::new(512, 288)
        ));
        let label = graph.node(&format!("{cam}:preview-label")).unwrap();
        assert!(matches!(&label.kind, NodeKind::TextOverlay { text, .. } if *text == cam[3..]));

        // the live branch goes into the live mixer
        assert!(graph
            .peer(&endpoint(&format!("{cam}:distributor-live"), "src"))
            .is_some_and(|peer| peer.node.as_str() == "live:video-mixer"));
        assert!(graph
            .peer(&endpoint(&format!("{cam}:distributor-monitor"), "src"))
            .is_some_and(|peer| peer.node.as_str() == format!("{cam}:preview-scale")));
        assert!(graph
            .peer(&endpoint(&format!("{cam}:audioconvert"), "src"))
            .is_some_and(|peer| peer.node.as_str() == "live:audio-selector"));
    }
}

#[tokio::test]
async fn distributor_branches_are_independent() {
    testing::init();

    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let sources = assembler
        .discover(testing::test_specs(1))
        .collect::<anyhow::Result<Vec<_>>>()
        .unwrap();
    let assembled = assembler.assemble(sources).await.unwrap();
    let graph = assembled.graph();

    let tee = graph.node("cam0:distributor-tee").unwrap();
    assert_eq!(tee.requested.len(), 2);
    for branch in ["cam0:distributor-live", "cam0:distributor-monitor"] {
        let queue = graph.node(branch).unwrap();
        assert!(matches!(
            queue.kind,
            NodeKind::Queue {
                leaky: crate::Leaky::Downstream,
                ..
            }
        ));
    }
    assert_eq!(
        graph.peer(&endpoint("cam0:video_src", "src")),
        Some(&endpoint("cam0:distributor-tee", "sink"))
    );
}

#[tokio::test]
async fn highlighted_sources_get_a_border() {
    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let mut specs = testing::test_specs(2);
    specs[1].highlight = true;
    specs[1].name = Some("stage".to_owned());

    let sources = assembler
        .discover(specs)
        .collect::<anyhow::Result<Vec<_>>>()
        .unwrap();
    assert!(!sources[0].is_highlighted());
    assert!(sources[1].is_highlighted());
    let assembled = assembler.assemble(sources).await.unwrap();
    let graph = assembled.graph();

    assert!(matches!(
        graph.node("cam0:preview-crop").unwrap().kind,
        NodeKind::Crop { inset: 0 }
    ));
    assert!(matches!(
        graph.node("stage:preview-crop").unwrap().kind,
        NodeKind::Crop {
            inset: HIGHLIGHT_INSET
        }
    ));
    assert!(matches!(
        graph.node("stage:preview-border").unwrap().kind,
        NodeKind::Border {
            width: HIGHLIGHT_INSET,
            ..
        }
    ));
}

#[tokio::test]
async fn tiny_previews_keep_a_picture_inside_the_highlight() {
    testing::init();

    // 8x5 pixel previews
    let mut assembler = testing::topology_assembler(Size::new(16, 9));
    let mut specs = testing::test_specs(4);
    specs[0].highlight = true;

    let sources = assembler
        .discover(specs)
        .collect::<anyhow::Result<Vec<_>>>()
        .unwrap();
    let assembled = assembler.assemble(sources).await.unwrap();
    let graph = assembled.graph();

    assert!(matches!(
        &graph.node("cam0:preview-caps").unwrap().kind,
        NodeKind::CapsFilter(caps) if caps.size == Size::new(8, 5)
    ));
    assert!(matches!(
        graph.node("cam0:preview-crop").unwrap().kind,
        NodeKind::Crop { inset: 2 }
    ));
    assert!(matches!(
        graph.node("cam0:preview-border").unwrap().kind,
        NodeKind::Border { width: 2, .. }
    ));
    assert!(matches!(
        graph.node("cam1:preview-crop").unwrap().kind,
        NodeKind::Crop { inset: 0 }
    ));
}

#[tokio::test]
async fn zero_sources_show_only_the_background() {
    let assembler = testing::topology_assembler(testing::CANVAS);
    let assembled = assembler.assemble(Vec::new()).await.unwrap();

    assert!(assembled.placements().is_empty());
    assert_eq!(assembled.shape(), GridShape::default());

    let mosaic = assembled.graph().node("mosaic:compositor").unwrap();
    assert_eq!(mosaic.requested.len(), 1);
    assert!(assembled.describe().contains("    + sink_0 at (0,0)\n"));
}

#[tokio::test]
async fn incompatible_source_is_a_configuration_error() {
    testing::init();

    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let camera = assembler
        .add_source(SourceId::from("cam0"), &testing::test_specs(1)[0])
        .unwrap();

    // audio where video is expected
    let audio = camera.audio().unwrap().clone();
    let broken = SourceDescriptor::resolved(SourceId::from("broken"), audio, None, Size::MONITOR);

    let err = assembler.assemble(vec![broken]).await.unwrap_err();
    let graph_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<GraphError>())
        .unwrap();
    assert!(matches!(graph_error, GraphError::MediaMismatch { .. }));
    assert!(format!("{err:#}").contains("unable to attach source 'broken'"));
}

#[test]
fn discovery_is_finite() {
    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let mut specs = testing::test_specs(2);
    specs[0].name = Some("wide".to_owned());

    let mut discovery = assembler.discover(specs);
    assert_eq!(discovery.size_hint(), (2, Some(2)));
    let ids: Vec<String> = discovery
        .by_ref()
        .map(|source| source.unwrap().id().to_string())
        .collect();
    assert_eq!(ids, vec!["wide", "cam1"]);
    assert!(discovery.next().is_none());
    assert!(discovery.next().is_none());
}

#[test]
fn failing_source_stops_nothing_else() {
    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let specs = vec![
        SourceSpec::new(SourceLocator::Uri {
            uri: "not a uri".to_owned(),
        }),
        testing::test_specs(1).remove(0),
    ];

    let results: Vec<_> = assembler.discover(specs).collect();
    assert!(results[0].is_err());
    assert!(results[1].is_ok());
}

#[test]
fn sources_are_normalized_to_their_resolution() {
    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let mut spec = SourceSpec::new(SourceLocator::Decklink {
        device: 1,
        mode: DeckLinkMode::Hd1080p25,
    });
    let source = assembler.add_source(SourceId::from("card"), &spec).unwrap();
    assert_eq!(source.dimensions(), Some(Size::FHD));

    spec.resolution = Some(Size::HD);
    let source = assembler.add_source(SourceId::from("small"), &spec).unwrap();
    assert_eq!(source.dimensions(), Some(Size::HD));

    let caps = assembler.graph().node("small:caps").unwrap();
    assert!(matches!(
        &caps.kind,
        NodeKind::CapsFilter(caps) if caps.size == Size::HD && caps.framerate == Some((25, 1))
    ));
}
