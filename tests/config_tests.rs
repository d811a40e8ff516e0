use battleship_hunt::{
    classic_fleet, Anchor, ConfigError, GameConfig, GameMode, Orientation, Placement, ShipType,
    DEFAULT_BOARD_SIZE,
};

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.board_size, DEFAULT_BOARD_SIZE);
    assert_eq!(config.total_ship_cells(), 17);
    assert_eq!(config.fleet[0], ShipType::new("Carrier", 5));
    assert_eq!(config.mode, GameMode::Single);
    config.validate().unwrap();
    GameConfig::demo_duel().validate().unwrap();
}

#[test]
fn test_partial_json_takes_defaults() {
    let config = GameConfig::from_json(r#"{ "board_size": 8, "mode": "duel" }"#).unwrap();
    assert_eq!(config.board_size, 8);
    assert_eq!(config.mode, GameMode::Duel);
    assert_eq!(config.fleet, classic_fleet());
    assert_eq!(config.placement, Placement::Random);
}

#[test]
fn test_fixed_json() {
    let text = r#"{
        "fleet": [{ "name": "Carrier", "size": 5 }],
        "placement": {
            "kind": "fixed",
            "anchors": [{ "row": 0, "col": 0, "orientation": "horizontal" }]
        }
    }"#;
    let config = GameConfig::from_json(text).unwrap();
    assert_eq!(
        config.placement,
        Placement::Fixed {
            anchors: vec![Anchor::new(0, 0, Orientation::Horizontal)]
        }
    );
}

#[test]
fn test_json_roundtrip_of_demo() {
    let demo = GameConfig::demo_duel();
    let text = serde_json::to_string(&demo).unwrap();
    assert_eq!(GameConfig::from_json(&text).unwrap(), demo);
}

#[test]
fn test_rejections() {
    let with = |f: fn(&mut GameConfig)| {
        let mut c = GameConfig::default();
        f(&mut c);
        c.validate().unwrap_err()
    };
    assert!(matches!(with(|c| c.board_size = 0), ConfigError::InvalidBoardSize { .. }));
    assert!(matches!(with(|c| c.board_size = 1000), ConfigError::InvalidBoardSize { .. }));
    assert!(matches!(with(|c| c.fleet.clear()), ConfigError::EmptyFleet));
    assert!(matches!(
        with(|c| c.fleet.push(ShipType::new("Ghost", 0))),
        ConfigError::ZeroLengthShip { .. }
    ));
    assert!(matches!(with(|c| c.board_size = 4), ConfigError::ShipTooLong { .. }));
    assert!(matches!(
        with(|c| {
            c.board_size = 5;
            c.fleet = vec![ShipType::new("Long", 5); 6];
        }),
        ConfigError::FleetTooLarge { cells: 30, available: 25 }
    ));
    assert!(matches!(
        with(|c| c.placement = Placement::Fixed { anchors: vec![] }),
        ConfigError::AnchorCountMismatch { anchors: 0, ships: 5 }
    ));
}

#[test]
fn test_bad_json() {
    assert!(matches!(GameConfig::from_json("{ not json"), Err(ConfigError::Parse(_))));
    assert!(matches!(
        GameConfig::from_json(r#"{ "board_size": 0 }"#),
        Err(ConfigError::InvalidBoardSize { .. })
    ));
}
