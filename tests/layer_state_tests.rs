//! Integration tests for layer state streams and files

mod common;

use common::{drawing_layers, drawing_line_types, plan_a, write_to_string, TempFile};
use dxf_layerstate::io::dxf::{TextReaderConfiguration, TextWriterConfiguration};
use dxf_layerstate::objects::{LayerPropertiesFlags, LayerPropertiesRestoreFlags};
use dxf_layerstate::{
    read_layer_states, write_layer_states, Color, DxfError, LayerState, LineWeight,
    TextChunkReader, TextChunkWriter, Transparency,
};
use std::fs;

const PLAN_A_TEXT: &str = "0\nLAYERSTATEDICTIONARY\n\
0\nLAYERSTATE\n\
1\nPLAN_A\n\
91\n2047\n\
301\n\n\
290\n0\n\
302\n0\n\
8\nWALLS\n90\n8\n62\n1\n370\n-3\n6\nContinuous\n440\n0\n\
8\nDOORS\n90\n10\n62\n3\n370\n25\n6\nDashed\n440\n33554559\n92\n65280\n\
0\nEOF\n";

/// Split a text stream into its `(code, value)` line pairs
fn pairs(text: &str) -> Vec<(String, String)> {
    let lines: Vec<&str> = text.lines().collect();
    lines
        .chunks(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect()
}

fn join(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(code, value)| format!("{}\n{}\n", code, value))
        .collect()
}

#[test]
fn test_end_to_end_plan_a() {
    let text = write_to_string(&plan_a());
    let state = LayerState::read_from(text.as_bytes()).unwrap();

    assert_eq!(state.name(), "PLAN_A");
    assert!(!state.paper_space);
    assert_eq!(state.current_layer, "0");

    let names: Vec<&str> = state.properties().map(|p| p.name()).collect();
    assert_eq!(names, vec!["WALLS", "DOORS"]);

    let walls = state.get("WALLS").unwrap();
    assert_eq!(walls.flags, LayerPropertiesFlags::PLOT);
    assert!(!walls.color.is_true_color());
    assert_eq!(walls.color, Color::RED);
    assert_eq!(walls.line_weight, LineWeight::Default);
    assert_eq!(walls.line_type, "Continuous");
    assert!(walls.transparency.is_opaque());

    let doors = state.get("doors").unwrap();
    assert_eq!(doors.flags, LayerPropertiesFlags::PLOT | LayerPropertiesFlags::FROZEN);
    assert!(doors.color.is_true_color());
    assert_eq!(doors.color.to_true_color(), Some(0x00FF00));
    assert_eq!(doors.line_weight, LineWeight::W0_25);
    assert_eq!(doors.line_type, "Dashed");
    assert_eq!(doors.transparency, Transparency::new(50).unwrap());

    assert_eq!(state, plan_a());
}

#[test]
fn test_written_layout() {
    assert_eq!(write_to_string(&plan_a()), PLAN_A_TEXT);
}

#[test]
fn test_reads_padded_crlf_stream() {
    let text: String = PLAN_A_TEXT
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i % 2 == 0 {
                format!("{:>3}\r\n", line)
            } else {
                format!("{}\r\n", line)
            }
        })
        .collect();
    assert_eq!(LayerState::read_from(text.as_bytes()).unwrap(), plan_a());
}

#[test]
fn test_unknown_pair_anywhere_inside_the_record() {
    let original = pairs(PLAN_A_TEXT);
    let expected = plan_a();

    // after the record sentinel and before the terminator
    for at in 2..original.len() {
        let mut stream = original.clone();
        stream.insert(at, ("1071".to_string(), "12345".to_string()));
        let state = LayerState::read_from(join(&stream).as_bytes())
            .unwrap_or_else(|err| panic!("insert at {} failed: {}", at, err));
        assert_eq!(state, expected, "insert at {}", at);
    }
}

#[test]
fn test_wrong_container_name() {
    let text = PLAN_A_TEXT.replacen("LAYERSTATEDICTIONARY", "WRONGNAME", 1);
    match LayerState::read_from(text.as_bytes()) {
        Err(DxfError::UnexpectedSentinel { expected, found }) => {
            assert_eq!(expected, "LAYERSTATEDICTIONARY");
            assert_eq!(found, "WRONGNAME");
        }
        other => panic!("expected a sentinel error, got {:?}", other),
    }
}

#[test]
fn test_last_color_pair_wins() {
    let text = "0\nLAYERSTATEDICTIONARY\n0\nLAYERSTATE\n1\nX\n\
                8\nL\n62\n5\n370\n-3\n92\n16711680\n0\nEOF\n";
    let state = LayerState::read_from(text.as_bytes()).unwrap();
    assert_eq!(state.get("L").unwrap().color.to_true_color(), Some(16711680));
}

#[test]
fn test_truncated_after_layer_name() {
    let text = "0\nLAYERSTATEDICTIONARY\n0\nLAYERSTATE\n1\nX\n8\nWALLS\n";
    assert!(matches!(
        LayerState::read_from(text.as_bytes()),
        Err(DxfError::StreamExhausted { .. })
    ));
}

#[test]
fn test_encoded_round_trip() {
    let mut state = plan_a();
    state.description = "Plan für Erdgeschoß".to_string();
    // bytes of this name in Windows-1252 also form valid UTF-8
    state.current_layer = "Ã©".to_string();

    let mut buf = Vec::new();
    {
        let config = TextWriterConfiguration {
            encoding: Some(encoding_rs::WINDOWS_1252),
            ..Default::default()
        };
        let mut writer = TextChunkWriter::with_configuration(&mut buf, config);
        state.write(&mut writer).unwrap();
    }
    assert!(std::str::from_utf8(&buf).is_err());

    let config = TextReaderConfiguration {
        encoding: Some(encoding_rs::WINDOWS_1252),
    };
    let mut reader = TextChunkReader::with_configuration(buf.as_slice(), config);
    assert_eq!(LayerState::read(&mut reader).unwrap(), state);
}

#[test]
fn test_dictionary_with_several_states() {
    let mut plan_b = LayerState::new("PLAN_B").unwrap();
    plan_b.paper_space = true;
    plan_b.description = "empty".to_string();
    let states = vec![plan_a(), plan_b];

    let mut buf = Vec::new();
    {
        let mut writer = TextChunkWriter::new(&mut buf);
        write_layer_states(&mut writer, &states).unwrap();
    }

    let mut reader = TextChunkReader::new(buf.as_slice());
    assert_eq!(read_layer_states(&mut reader).unwrap(), states);

    // a single-state read takes the first record only
    assert_eq!(LayerState::read_from(buf.as_slice()).unwrap(), states[0]);
}

#[test]
fn test_snapshot_restore_cycle() {
    let state = plan_a();
    let mut layers = drawing_layers();
    let line_types = drawing_line_types();

    let restored = state.restore(&mut layers, &line_types, LayerPropertiesRestoreFlags::ALL);
    assert_eq!(restored, 2);

    let doors = layers.get("DOORS").unwrap();
    assert!(doors.is_frozen());
    assert_eq!(doors.line_type, "Dashed");
    assert_eq!(doors.color.to_true_color(), Some(0x00FF00));
    assert_eq!(doors.line_weight, LineWeight::W0_25);

    let snapshot = LayerState::from_layers("SNAPSHOT", &layers, "WALLS").unwrap();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.current_layer, "WALLS");
    assert_eq!(snapshot.get("DOORS"), state.get("DOORS"));
}

#[test]
fn test_save_and_load() {
    let file = TempFile::new("save_and_load");
    let state = plan_a();

    assert!(state.save(file.path()));
    assert!(!file.temporary_sibling().exists());
    assert_eq!(fs::read_to_string(file.path()).unwrap(), PLAN_A_TEXT);

    assert_eq!(LayerState::load(file.path()), Some(state));
}

#[test]
fn test_save_replaces_existing_file() {
    let file = TempFile::new("replace");
    fs::write(file.path(), "stale contents that are longer than nothing").unwrap();

    assert!(plan_a().save(file.path()));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), PLAN_A_TEXT);
}

#[test]
fn test_save_into_missing_directory() {
    let dir = common::temp_path("missing_dir");
    let path = dir.join("state.las");

    assert!(!plan_a().save(&path));
    assert!(!path.exists());
    assert!(matches!(plan_a().try_save(&path), Err(DxfError::Io(_))));
}

#[test]
fn test_load_missing_file() {
    let file = TempFile::new("missing");
    assert_eq!(LayerState::load(file.path()), None);
    assert!(matches!(LayerState::try_load(file.path()), Err(DxfError::Io(_))));
}

#[test]
fn test_load_invalid_files() {
    let cases = [
        "",
        "0\nSECTION\n",
        "zero\nLAYERSTATEDICTIONARY\n",
        "0\nLAYERSTATEDICTIONARY\n0\nLAYERSTATE\n1\nX\n8\nWALLS\n90\nfrozen\n0\nEOF\n",
        "0\nLAYERSTATEDICTIONARY\n0\nLAYERSTATE\n1\nX\n8\nWALLS\n",
        "0\nLAYERSTATEDICTIONARY\n0\nLAYERSTATE\n301\nno name\n0\nEOF\n",
    ];
    for (i, contents) in cases.iter().enumerate() {
        let file = TempFile::new("invalid");
        fs::write(file.path(), contents).unwrap();
        assert_eq!(LayerState::load(file.path()), None, "case {}", i);
    }
}
