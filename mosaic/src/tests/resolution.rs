// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use std::time::Duration;

use tokio::time::timeout;

use crate::{testing, GraphError, Position, Size, SourceDescriptor, SourceId};

const PATIENCE: Duration = Duration::from_millis(50);

#[tokio::test]
async fn assembly_waits_for_every_source() {
    testing::init();

    let mut assembler = testing::topology_assembler(Size::MONITOR);
    let created = assembler
        .discover(testing::test_specs(2))
        .collect::<anyhow::Result<Vec<_>>>()
        .unwrap();

    let (mut pending, mut resolvers) = (Vec::new(), Vec::new());
    for source in &created {
        let (descriptor, resolver) = SourceDescriptor::pending(
            source.id().clone(),
            source.video().clone(),
            source.audio().cloned(),
        );
        assert_eq!(descriptor.dimensions(), None);
        pending.push(descriptor);
        resolvers.push(resolver);
    }

    let assembly = assembler.assemble(pending);
    tokio::pin!(assembly);
    assert!(timeout(PATIENCE, &mut assembly).await.is_err());

    // resolve in reverse order
    resolvers[1].resolve(Size::HD).unwrap();
    assert!(timeout(PATIENCE, &mut assembly).await.is_err());
    resolvers[0].resolve(Size::SD).unwrap();

    let assembled = assembly.await.unwrap();
    let placements = assembled.placements();
    assert_eq!(placements[0].0, SourceId::from("cam0"));
    assert_eq!(placements[1].0, SourceId::from("cam1"));

    // both sources are limited by their width
    let first = placements[0].1.rect.view();
    assert_eq!(first.size, Size::new(512, 384));
    assert_eq!(first.pos, Position { x: 0, y: 96 });
    let second = placements[1].1.rect.view();
    assert_eq!(second.size, Size::new(512, 288));
    assert_eq!(second.pos, Position { x: 512, y: 144 });
}

#[tokio::test]
async fn dropped_resolver_never_resolves() {
    testing::init();

    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let source = assembler
        .discover(testing::test_specs(1))
        .next()
        .unwrap()
        .unwrap();
    let (pending, resolver) =
        SourceDescriptor::pending(source.id().clone(), source.video().clone(), None);
    drop(resolver);

    assert!(timeout(PATIENCE, assembler.assemble(vec![pending]))
        .await
        .is_err());
}

#[tokio::test]
async fn resolution_of_resolved_source_is_immediate() {
    let mut assembler = testing::topology_assembler(testing::CANVAS);
    let mut source = assembler
        .discover(testing::test_specs(1))
        .next()
        .unwrap()
        .unwrap();

    assert_eq!(source.dimensions(), Some(testing::CANVAS));
    assert_eq!(
        timeout(PATIENCE, source.resolution()).await.unwrap(),
        testing::CANVAS
    );
}

#[test]
fn first_resolution_wins() {
    let (descriptor, resolver) = SourceDescriptor::pending(
        SourceId::from("cam0"),
        crate::Endpoint {
            node: crate::NodeName::new("cam0", "video_src"),
            pad: "src".to_owned(),
        },
        None,
    );

    resolver.resolve(Size::FHD).unwrap();
    resolver.resolve(Size::SD).unwrap();
    assert_eq!(descriptor.dimensions(), Some(Size::FHD));

    // clones share the resolution
    assert_eq!(descriptor.clone().dimensions(), Some(Size::FHD));
}

#[test]
fn empty_dimensions_are_rejected() {
    let (descriptor, resolver) = SourceDescriptor::pending(
        SourceId::from("cam0"),
        crate::Endpoint {
            node: crate::NodeName::new("cam0", "video_src"),
            pad: "src".to_owned(),
        },
        None,
    );

    let err = resolver.resolve(Size::new(1920, 0)).unwrap_err();
    assert!(matches!(
        err,
        GraphError::InvalidDimensions { ref source_id, .. } if source_id == "cam0"
    ));
    assert_eq!(descriptor.dimensions(), None);
}
