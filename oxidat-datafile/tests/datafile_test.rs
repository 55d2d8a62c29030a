//! Datafile integration tests.

use oxidat_core::{DatError, FourCc, Resource, TagContext};
use oxidat_datafile::{
    Datafile, DatafileParser, DatafileStats, DatafileWriter, Object, ObjectCompression, PackKind,
    ParseConfig, Property, load, load_path, tags,
};
use oxidat_lzss::compress;
use proptest::prelude::*;

fn minimal_file() -> Vec<u8> {
    let mut data = b"slh.ALL.".to_vec();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(b"TEST");
    data.extend_from_slice(&3u32.to_be_bytes());
    data.extend_from_slice(&3i32.to_be_bytes());
    data.extend_from_slice(b"abc");
    data
}

fn sample_tree() -> Datafile {
    Datafile::new(vec![
        Object::new(
            tags::PALETTE,
            vec![
                Property::new(tags::NAME, "GAME_PAL"),
                Property::new(tags::DATE, "1-1-2009, 12:00"),
            ],
            (0..=255u8).flat_map(|i| [i, i, i]).collect(),
        ),
        Object::container(
            vec![Property::new(tags::NAME, "UNITS")],
            vec![
                Object::new(
                    tags::BITMAP,
                    vec![
                        Property::new(tags::NAME, "ORC"),
                        Property::new(tags::ORIG, "orc.bmp"),
                        Property::new(tags::NAME, "ORC_ALIAS"),
                    ],
                    vec![0u8; 1024],
                ),
                Object::container(Vec::new(), Vec::new()),
                Object::new(tags::DATA, Vec::new(), Vec::new()),
            ],
        ),
        Object::new(
            tags::SAMPLE,
            vec![Property::new(tags::NAME, "CLICK")],
            b"RIFF....WAVEfmt ".repeat(8),
        ),
    ])
}

#[test]
fn test_minimal_unpacked_file() {
    let dat = load(&minimal_file()).expect("load failed");
    assert_eq!(dat.len(), 1);

    let obj = &dat.objects()[0];
    assert_eq!(obj.kind(), FourCc::from_bytes(b"TEST"));
    assert!(obj.properties().is_empty());
    assert_eq!(obj.payload(), Some(&b"abc"[..]));
}

#[test]
fn test_minimal_packed_file() {
    let unpacked = minimal_file();
    let mut packed = b"slh!".to_vec();
    packed.extend_from_slice(&compress(&unpacked[4..]));

    assert_eq!(load(&packed).unwrap(), load(&unpacked).unwrap());
}

#[test]
fn test_container_with_two_children() {
    let mut body = 2u32.to_be_bytes().to_vec();
    for payload in [&b"first"[..], &b"second"[..]] {
        body.extend_from_slice(b"DATA");
        body.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        body.extend_from_slice(&(payload.len() as i32).to_be_bytes());
        body.extend_from_slice(payload);
    }

    let mut data = b"slh.ALL.".to_vec();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(b"FILE");
    data.extend_from_slice(&(body.len() as u32).to_be_bytes());
    data.extend_from_slice(&(body.len() as i32).to_be_bytes());
    data.extend_from_slice(&body);

    let dat = load(&data).unwrap();
    let dir = &dat.objects()[0];
    assert!(dir.payload().is_none());
    let children = dir.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].payload(), Some(&b"second"[..]));
}

#[test]
fn test_writer_roundtrip_all_modes() {
    let tree = sample_tree();
    let packings = [PackKind::Unpacked, PackKind::Packed];
    let compressions = [
        ObjectCompression::Stored,
        ObjectCompression::Compressed,
        ObjectCompression::Auto,
    ];

    for packing in packings {
        for compression in compressions {
            let bytes = DatafileWriter::new()
                .with_packing(packing)
                .with_compression(compression)
                .write(&tree)
                .unwrap();
            assert_eq!(PackKind::detect(&bytes).unwrap(), packing);
            assert_eq!(
                load(&bytes).unwrap(),
                tree,
                "{:?}/{:?}",
                packing,
                compression
            );
        }
    }
}

#[test]
fn test_write_path_and_load_path() {
    let path = std::env::temp_dir().join(format!("oxidat_test_{}.dat", std::process::id()));
    let tree = sample_tree();

    DatafileWriter::new()
        .with_compression(ObjectCompression::Auto)
        .write_path(&tree, &path)
        .unwrap();
    let loaded = load_path(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.unwrap(), tree);
}

#[test]
fn test_load_path_missing_file() {
    let result = load_path("/nonexistent/oxidat/missing.dat");
    assert!(matches!(result, Err(DatError::Io(_))));
}

#[test]
fn test_find_and_stats() {
    let bytes = DatafileWriter::new().write(&sample_tree()).unwrap();
    let dat = load(&bytes).unwrap();

    let orc = dat.find("UNITS/ORC").unwrap();
    assert_eq!(orc.kind(), tags::BITMAP);
    assert_eq!(orc.properties_with(tags::NAME).count(), 2);

    let stats = DatafileStats::collect(&dat);
    assert_eq!(stats.roots, 3);
    assert_eq!(stats.objects, 6);
    assert_eq!(stats.containers, 2);
    assert_eq!(stats.max_depth, 1);
}

#[test]
fn test_unknown_pack_indicator() {
    let mut data = minimal_file();
    data[3] = b' ';
    match load(&data) {
        Err(DatError::UnknownFormatTag { context, found }) => {
            assert_eq!(context, TagContext::PackIndicator);
            assert_eq!(found.to_u32(), 0x736C_6820);
        }
        other => panic!("expected UnknownFormatTag, got {:?}", other),
    }
}

#[test]
fn test_bad_datafile_magic() {
    let mut data = minimal_file();
    data[4..8].copy_from_slice(b"ALL!");
    assert!(matches!(
        load(&data),
        Err(DatError::UnknownFormatTag {
            context: TagContext::DatafileMagic,
            ..
        })
    ));
}

#[test]
fn test_truncated_payload() {
    let data = minimal_file();
    let short = &data[..data.len() - 1];
    // Offsets are relative to the stream after the pack indicator.
    assert!(matches!(
        load(short),
        Err(DatError::TruncatedStream {
            offset: 20,
            needed: 3,
            available: 2
        })
    ));
}

#[test]
fn test_truncated_header() {
    assert!(matches!(
        load(b"slh.ALL.\0\0"),
        Err(DatError::TruncatedStream { needed: 4, .. })
    ));
}

#[test]
fn test_limits() {
    let bytes = DatafileWriter::new().write(&sample_tree()).unwrap();

    let shallow = DatafileParser::new(ParseConfig::default().with_max_depth(0));
    assert!(matches!(
        shallow.parse(&bytes),
        Err(DatError::ResourceExhaustion {
            resource: Resource::NestingDepth,
            limit: 0
        })
    ));

    let small = DatafileParser::new(ParseConfig::default().with_max_objects(5));
    assert!(matches!(
        small.parse(&bytes),
        Err(DatError::ResourceExhaustion {
            resource: Resource::ObjectCount,
            limit: 5
        })
    ));

    let exact = DatafileParser::new(ParseConfig::default().with_max_objects(6));
    assert_eq!(exact.parse(&bytes).unwrap(), sample_tree());
}

#[test]
fn test_reparse_is_deterministic() {
    let bytes = DatafileWriter::new()
        .with_packing(PackKind::Packed)
        .with_compression(ObjectCompression::Compressed)
        .write(&sample_tree())
        .unwrap();
    assert_eq!(load(&bytes).unwrap(), load(&bytes).unwrap());
}

fn arb_leaf() -> impl Strategy<Value = Object> {
    let property = (any::<[u8; 4]>(), proptest::collection::vec(any::<u8>(), 0..16));
    (
        proptest::collection::vec(property, 0..3),
        any::<[u8; 4]>().prop_filter("reserved tag", |k| k != b"FILE" && k != b"prop"),
        proptest::collection::vec(0u8..4, 0..64),
    )
        .prop_map(|(props, kind, payload)| {
            let properties = props
                .into_iter()
                .map(|(id, value)| Property::new(FourCc::new(id), value))
                .collect();
            Object::new(FourCc::new(kind), properties, payload)
        })
}

fn arb_object() -> impl Strategy<Value = Object> {
    arb_leaf().prop_recursive(3, 16, 4, |inner| {
        proptest::collection::vec(inner, 0..4)
            .prop_map(|children| Object::container(Vec::new(), children))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_writer_parser_agree(
        roots in proptest::collection::vec(arb_object(), 0..4),
        packed in any::<bool>(),
        compressed in any::<bool>(),
    ) {
        let tree = Datafile::new(roots);
        let packing = if packed { PackKind::Packed } else { PackKind::Unpacked };
        let compression = if compressed {
            ObjectCompression::Compressed
        } else {
            ObjectCompression::Stored
        };
        let bytes = DatafileWriter::new()
            .with_packing(packing)
            .with_compression(compression)
            .write(&tree)
            .unwrap();
        prop_assert_eq!(load(&bytes).unwrap(), tree);
    }
}
