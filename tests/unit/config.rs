use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("yuv_overlay_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn defaults_match_named_constants() {
    let cfg = Config::default();
    assert_eq!(cfg.input_video, PathBuf::from("input.yuv"));
    assert_eq!(cfg.output_video, PathBuf::from("output.yuv"));
    assert_eq!(cfg.overlay_image, PathBuf::from("input.bmp"));
    assert_eq!((cfg.frame_width, cfg.frame_height), (1920, 1080));
    assert_eq!(cfg.threads, None);
    cfg.validate().unwrap();
}

#[test]
fn parse_kv_overrides_and_keeps_defaults() {
    let text = "\
# overlay run
  Input_Video = clips/in.yuv
output_video=\"out dir/out.yuv\"
; width only
frame_width = 640

threads = 3
";
    let cfg = Config::parse_kv(text).unwrap();
    assert_eq!(cfg.input_video, PathBuf::from("clips/in.yuv"));
    assert_eq!(cfg.output_video, PathBuf::from("out dir/out.yuv"));
    assert_eq!(cfg.overlay_image, PathBuf::from(DEFAULT_OVERLAY_IMAGE));
    assert_eq!(cfg.frame_width, 640);
    assert_eq!(cfg.frame_height, DEFAULT_FRAME_HEIGHT);
    assert_eq!(cfg.threads, Some(3));
}

#[test]
fn parse_kv_ignores_unknown_keys_and_accepts_auto_threads() {
    let cfg = Config::parse_kv("colour = blue\nthreads = auto\n").unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn parse_kv_reports_line_numbers() {
    let err = Config::parse_kv("frame_width=10\nnot a pair\n").unwrap_err();
    assert!(matches!(err, OverlayError::Config(_)));
    assert!(err.to_string().contains("line 2"));

    let err = Config::parse_kv("\n\nframe_height = tall").unwrap_err();
    assert!(err.to_string().contains("line 3"));
    assert!(err.to_string().contains("frame_height"));

    assert!(Config::parse_kv("frame_width = -4").is_err());
}

#[test]
fn validate_rejects_bad_values() {
    let zero = Config {
        frame_height: 0,
        ..Config::default()
    };
    assert!(matches!(zero.validate(), Err(OverlayError::Config(_))));

    let same = Config {
        output_video: PathBuf::from(DEFAULT_INPUT_VIDEO),
        ..Config::default()
    };
    assert!(same.validate().is_err());

    let empty = Config {
        overlay_image: PathBuf::new(),
        ..Config::default()
    };
    assert!(empty.validate().is_err());

    let no_workers = Config {
        threads: Some(0),
        ..Config::default()
    };
    assert!(no_workers.validate().is_err());
}

#[test]
fn from_path_picks_parser_by_extension() {
    let dir = scratch_dir("config");

    let kv = dir.join("run.cfg");
    std::fs::write(&kv, "frame_width=320\nframe_height=240\n").unwrap();
    let cfg = Config::from_path(&kv).unwrap();
    assert_eq!(cfg.frame_size().unwrap(), FrameSize::new(320, 240).unwrap());

    let json = dir.join("run.JSON");
    std::fs::write(&json, r#"{ "overlay_image": "logo.bmp", "threads": 2 }"#).unwrap();
    let cfg = Config::from_path(&json).unwrap();
    assert_eq!(cfg.overlay_image, PathBuf::from("logo.bmp"));
    assert_eq!(cfg.threads, Some(2));
    assert_eq!(cfg.frame_width, DEFAULT_FRAME_WIDTH);

    let bad = dir.join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    assert!(matches!(
        Config::from_path(&bad),
        Err(OverlayError::Config(_))
    ));

    assert!(matches!(
        Config::from_path(&dir.join("missing.cfg")),
        Err(OverlayError::Io { .. })
    ));
}
