// Test utility module for gregorender integration tests
#![allow(dead_code)]

use gregorender::chant::Chant;
use gregorender::config::{RenderConfig, ToolPaths};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp directory with stub stage executables and render directories.
pub struct TestEnv {
    pub root: TempDir,
    pub config: RenderConfig,
}

impl TestEnv {
    /// Stub toolchain that behaves like the real one: the compiler copies its
    /// input to its output (failing when the input contains `FAILME`), the
    /// typesetter writes `render.dvi` into its cwd, and the converter writes
    /// an SVG to its `--output` path.
    pub fn with_fake_tools() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        let bin = root.path().join("bin");
        fs::create_dir_all(&bin).unwrap();

        let gregorio = write_script(
            &bin.join("gregorio"),
            r#"#!/bin/sh
# usage: gregorio -o <out> <in>
out=$2
in=$3
if grep -q "FAILME" "$in"; then
  echo "gregorio: fatal error: unreadable neume" >&2
  exit 1
fi
cat "$in" > "$out"
"#,
        );
        let lualatex = write_script(
            &bin.join("lualatex"),
            r#"#!/bin/sh
printf 'dvi' > render.dvi
"#,
        );
        let dvisvgm = write_script(
            &bin.join("dvisvgm"),
            r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --output=*) out="${arg#--output=}" ;;
  esac
done
printf '<svg/>' > "$out"
"#,
        );

        let config = RenderConfig {
            source: root.path().join("chants.json"),
            output_dir: root.path().join("images"),
            temp_dir: root.path().join("temp_build"),
            tools: ToolPaths {
                gregorio,
                lualatex,
                dvisvgm,
            },
            ..RenderConfig::default()
        };

        Self { root, config }
    }

    /// Swap the typesetter for one that always fails.
    pub fn break_typesetter(&mut self) {
        self.config.tools.lualatex = write_script(
            &self.root.path().join("bin/lualatex-broken"),
            "#!/bin/sh\nexit 1\n",
        );
    }

    pub fn write_collection(&self, chants: &str) -> PathBuf {
        fs::write(&self.config.source, chants).unwrap();
        self.config.source.clone()
    }
}

/// Write an executable shell script and return its path as a string.
pub fn write_script(path: &Path, body: &str) -> String {
    fs::write(path, body).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path.to_string_lossy().into_owned()
}

/// A renderable chant with a plain score.
pub fn valid_chant(id: u64) -> Chant {
    chant_json(&format!(
        r#"{{"id": {}, "incipit": "Ave Maria", "mode": "1", "gabc": "[[\"gabc\", \"(c4) A(f)ve(g) (::)\"]]"}}"#,
        id
    ))
}

/// A chant whose score trips the stub compiler.
pub fn poisoned_chant(id: u64) -> Chant {
    chant_json(&format!(
        r#"{{"id": {}, "incipit": "Dies irae", "gabc": "[[\"gabc\", \"(c4) FAILME (::)\"]]"}}"#,
        id
    ))
}

/// A chant with no notation field at all.
pub fn scoreless_chant(id: u64) -> Chant {
    chant_json(&format!(r#"{{"id": {}, "incipit": "Sine nota"}}"#, id))
}

fn chant_json(json: &str) -> Chant {
    serde_json::from_str(json).expect("invalid test chant json")
}
