//! Tests for connection export, import and binary snapshots.
mod common;
use common::*;
use serde_json::json;
use strategy_canvas::prelude::*;

#[test]
fn test_export_shape() {
    let manager = chain_manager();
    let export = manager.export_connections();
    assert_eq!(export.metadata.total_connections, 2);
    assert_eq!(export.metadata.canvas_state, CanvasState::default());

    let value = serde_json::to_value(&export).unwrap();
    let first = &value["connections"][0];
    for field in [
        "id",
        "source",
        "target",
        "sourceHandle",
        "targetHandle",
        "created",
        "isValid",
    ] {
        assert!(first.get(field).is_some(), "missing field '{}'", field);
    }
    assert_eq!(first["sourceHandle"], "output");
    assert_eq!(first["targetHandle"], "input");
    assert!(first["created"].is_i64());
    assert_eq!(value["metadata"]["totalConnections"], 2);
    assert_eq!(value["metadata"]["canvasState"]["zoom"], 1.0);
}

#[test]
fn test_export_import_round_trip() {
    let mut manager = chain_manager();
    assert!(connect(&mut manager, "A", "D"));
    let export = manager.export_connections();
    let json = export.to_json().unwrap();

    let mut restored = manager_with_nodes();
    let report = restored.import_connections_json(&json).unwrap();
    assert_eq!(
        report,
        ImportReport {
            imported: 3,
            flagged: 0,
            dropped: 0
        }
    );
    assert_eq!(restored.connections(), manager.connections());
}

#[test]
fn test_import_flags_unknown_nodes() {
    let export = chain_manager().export_connections();
    let mut manager = ConnectionManager::new();
    manager.update_nodes(vec![data_node("A", Point::ORIGIN), indicator_node("B", Point::ORIGIN)]);

    let report = manager.import_export(&export).unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.flagged, 1);
    assert_eq!(report.dropped, 0);

    let stats = manager.get_connection_stats();
    assert_eq!(stats.valid_connections, 1);
    assert_eq!(stats.invalid_connections, 1);

    // Once the missing node arrives the flagged connection becomes valid.
    manager.update_nodes(four_nodes());
    assert_eq!(manager.get_connection_stats().invalid_connections, 0);
}

#[test]
fn test_imported_invalid_flags_survive_node_updates() {
    let mut manager = manager_with_nodes();
    let data = json!({
        "connections": [
            { "id": "x", "source": "A", "target": "B", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": false }
        ]
    });
    let report = manager.import_connections(&data).unwrap();
    assert_eq!(report.flagged, 1);
    let exported = manager.export_connections();

    // Node pushes that keep both endpoints leave the stored flag alone.
    manager.update_nodes(four_nodes());
    manager.update_nodes(four_nodes());
    assert!(!manager.connections()[0].is_valid);
    assert_eq!(manager.export_connections(), exported);
}

#[test]
fn test_only_missing_endpoint_flags_are_cleared() {
    let mut manager = manager_with_nodes();
    let data = json!({
        "connections": [
            { "id": "x", "source": "A", "target": "B", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": false },
            { "id": "y", "source": "B", "target": "E", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true }
        ]
    });
    let report = manager.import_connections(&data).unwrap();
    assert_eq!(report.flagged, 2);

    let mut nodes = four_nodes();
    nodes.push(action_node("E", Point::new(1200.0, 0.0)));
    manager.update_nodes(nodes.clone());
    let validity: Vec<(&str, bool)> = manager
        .connections()
        .iter()
        .map(|c| (c.id.as_str(), c.is_valid))
        .collect();
    assert_eq!(validity, vec![("x", false), ("y", true)]);

    manager.update_nodes(nodes);
    assert_eq!(manager.get_connection_stats().invalid_connections, 1);
}

#[test]
fn test_import_drops_bad_records() {
    let mut manager = manager_with_nodes();
    let data = json!({
        "connections": [
            { "id": "ok", "source": "A", "target": "B", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true },
            { "id": "no-target", "source": "A", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true },
            { "id": "self", "source": "C", "target": "C", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true },
            { "id": "reverse", "source": "B", "target": "A", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true },
            { "id": "ok", "source": "C", "target": "D", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true },
            { "id": "bad-handle", "source": "C", "target": "D", "sourceHandle": "sideways",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true },
            "not even an object",
            { "id": "next", "source": "B", "target": "C", "sourceHandle": "output",
              "targetHandle": "input", "created": 1700000000000i64, "isValid": true }
        ],
        "metadata": { "totalConnections": 8 }
    });

    let report = manager.import_connections(&data).unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.dropped, 6);
    let ids: Vec<&str> = manager.connections().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["ok", "next"]);
}

#[test]
fn test_import_drops_cycles() {
    let mut manager = manager_with_nodes();
    let record = |id: &str, source: &str, target: &str| {
        json!({ "id": id, "source": source, "target": target, "sourceHandle": "output",
                "targetHandle": "input", "created": 0, "isValid": true })
    };
    let data = json!({
        "connections": [record("1", "A", "B"), record("2", "B", "C"), record("3", "C", "A")]
    });
    let report = manager.import_connections(&data).unwrap();
    assert_eq!(report.kept(), 2);
    assert_eq!(report.dropped, 1);
    assert!(!manager.has_path("C", "A"));
}

#[test]
fn test_import_rejects_documents_without_connections() {
    let mut manager = chain_manager();
    let before = manager.connections().to_vec();

    assert!(matches!(
        manager.import_connections(&json!({ "metadata": {} })),
        Err(ImportError::MissingConnections)
    ));
    assert!(matches!(
        manager.import_connections_json("{ not json"),
        Err(ImportError::InvalidJson(_))
    ));
    assert_eq!(manager.connections(), before.as_slice());
}

#[test]
fn test_binary_snapshot_round_trip() {
    let manager = chain_manager();
    let export = manager.export_connections();
    let bytes = export.to_bytes().unwrap();
    let decoded = ConnectionExport::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, export);

    assert!(matches!(
        ConnectionExport::from_bytes(&[0xff, 0x01]),
        Err(ImportError::Snapshot(_))
    ));
}
