// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use google_cloud_discovery_generator::model::Document;
    use google_cloud_discovery_generator::{
        Error, Options, generate, generate_files, parse_document,
    };
    use std::path::PathBuf;
    use std::process::Command;

    fn sample_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/test/sample-api.json")
    }

    fn sample() -> Result<Document> {
        let contents = std::fs::read(sample_path())?;
        Ok(parse_document(&contents)?)
    }

    #[test]
    fn deterministic() -> Result<()> {
        let doc = sample()?;
        let first = generate(&doc, &Options::default())?;
        let second = generate(&sample()?, &Options::default())?;
        assert_eq!(first.model, second.model);
        assert_eq!(first.methods, second.methods);
        Ok(())
    }

    #[test]
    fn model() -> Result<()> {
        let generated = generate(&sample()?, &Options::default())?;
        let model = generated.model;

        for name in [
            "Widget",
            "WidgetSpec",
            "WidgetSpecNested",
            "WidgetSpecNestedDimensions",
            "Part",
            "Owner",
            "ListWidgetsResponse",
            "Operation",
            "Status",
            "Empty",
        ] {
            assert!(model.contains(&format!("pub struct {name} {{\n")), "{name}");
            assert!(
                model.contains(&format!("impl gax::message::Message for {name} {{\n")),
                "{name}"
            );
            assert!(
                model.contains(&format!("impl std::fmt::Debug for {name} {{\n")),
                "{name}"
            );
        }
        assert!(model.contains("pub type Tags = std::vec::Vec<std::string::String>;"));
        assert!(!model.contains("#!["), "no inner attributes allowed");

        // Widget.tags is resolved through the alias.
        assert!(model.contains("    pub tags: std::option::Option<std::vec::Vec<std::string::String>>,"));
        // Direct recursion is boxed, recursion through a Vec is not.
        assert!(model.contains("    pub parent: std::option::Option<std::boxed::Box<Widget>>,"));
        assert!(model.contains("    pub children: std::option::Option<std::vec::Vec<Widget>>,"));
        assert!(model.contains("    pub owner: std::option::Option<std::boxed::Box<Owner>>,"));
        assert!(model.contains("    pub favorite_part: std::option::Option<std::boxed::Box<Part>>,"));
        assert!(model.contains("    pub status: std::option::Option<Status>,"));
        // Special wire encodings.
        assert!(model.contains("#[serde_as(as = \"std::option::Option<gax::internal::I64>\")]"));
        assert!(model.contains("#[serde_as(as = \"std::option::Option<gax::internal::U64>\")]"));
        assert!(model.contains("#[serde_as(as = \"std::option::Option<gax::internal::Base64>\")]"));
        assert!(model.contains(
            "#[serde_as(as = \"std::option::Option<std::vec::Vec<gax::internal::Base64>>\")]"
        ));
        assert!(model.contains(
            "#[serde_as(as = \"std::option::Option<std::collections::HashMap<_, gax::internal::I64>>\")]"
        ));
        // Identifiers that need care.
        assert!(model.contains("    #[serde(rename = \"@type\")]\n"));
        assert!(model.contains("    pub r#type: std::option::Option<std::string::String>,"));
        assert!(model.contains("    pub r#type_: std::option::Option<std::string::String>,"));
        assert!(model.contains("    pub self_: std::option::Option<std::string::String>,"));
        assert!(model.contains("    #[serde(rename = \"widgetID\")]\n"));
        assert!(model.contains("        \"Widget.spec.dimensions\"\n"));
        // Enum values are documented.
        assert!(model.contains("    /// * `ACTIVE`: The widget is active.\n"));
        Ok(())
    }

    #[test]
    fn methods() -> Result<()> {
        let generated = generate(&sample()?, &Options::default())?;
        let methods = generated.methods.expect("methods are generated by default");
        for name in [
            "PROJECTS_OPERATIONS_GET",
            "PROJECTS_WIDGETS_CREATE",
            "PROJECTS_WIDGETS_DELETE",
            "PROJECTS_WIDGETS_GET",
            "PROJECTS_WIDGETS_LIST",
        ] {
            assert!(
                methods.contains(&format!("pub const {name}: gax::path_template::Method")),
                "{name}"
            );
        }
        let all = methods
            .split("pub const ALL: &[gax::path_template::Method] = &[\n")
            .nth(1)
            .expect("ALL is generated");
        assert_eq!(
            all,
            "    PROJECTS_OPERATIONS_GET,\n    PROJECTS_WIDGETS_CREATE,\n    PROJECTS_WIDGETS_DELETE,\n    PROJECTS_WIDGETS_GET,\n    PROJECTS_WIDGETS_LIST,\n];\n"
        );
        assert!(methods.contains("pub const ROOT_URL: &str = \"https://sample.googleapis.com/\";"));
        assert!(methods.contains(
            "pub const MTLS_ROOT_URL: &str = \"https://sample.mtls.googleapis.com/\";"
        ));
        Ok(())
    }

    #[test]
    fn skip_methods() -> Result<()> {
        let options = Options {
            methods: false,
            ..Default::default()
        };
        let generated = generate(&sample()?, &options)?;
        assert!(generated.methods.is_none());
        Ok(())
    }

    #[test]
    fn files() -> Result<()> {
        let output = tempfile::tempdir()?;
        let target = output.path().join("nested/out");
        generate_files(sample_path(), &target, &Options::default())?;
        let model = std::fs::read_to_string(target.join("model.rs"))?;
        let methods = std::fs::read_to_string(target.join("methods.rs"))?;
        let generated = generate(&sample()?, &Options::default())?;
        assert_eq!(model, generated.model);
        assert_eq!(Some(methods), generated.methods);
        Ok(())
    }

    #[test]
    fn missing_input() -> Result<()> {
        let output = tempfile::tempdir()?;
        let got = generate_files(
            output.path().join("does-not-exist.json"),
            output.path(),
            &Options::default(),
        );
        assert!(matches!(got, Err(Error::Io { .. })), "{got:?}");
        let msg = got.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("does-not-exist.json"), "{msg}");
        Ok(())
    }

    #[test]
    fn invalid_json() {
        let got = parse_document(b"{not json");
        assert!(matches!(got, Err(Error::Json(_))), "{got:?}");
    }

    #[test]
    fn cli_output_directory() -> Result<()> {
        let output = tempfile::tempdir()?;
        let status = Command::new(env!("CARGO_BIN_EXE_discogen"))
            .arg("--input")
            .arg(sample_path())
            .arg("--output")
            .arg(output.path())
            .arg("--skip-methods")
            .status()?;
        assert!(status.success(), "{status:?}");
        assert!(output.path().join("model.rs").exists());
        assert!(!output.path().join("methods.rs").exists());
        Ok(())
    }

    #[test]
    fn cli_stdout() -> Result<()> {
        let result = Command::new(env!("CARGO_BIN_EXE_discogen"))
            .arg("--input")
            .arg(sample_path())
            .arg("--gax-crate")
            .arg("google_cloud_gax")
            .output()?;
        assert!(result.status.success(), "{result:?}");
        let stdout = String::from_utf8(result.stdout)?;
        assert!(stdout.contains("impl google_cloud_gax::message::Message for Widget {"));
        assert!(stdout.contains("pub const PROJECTS_WIDGETS_GET: google_cloud_gax::path_template::Method"));
        Ok(())
    }

    #[test]
    fn cli_error() -> Result<()> {
        let result = Command::new(env!("CARGO_BIN_EXE_discogen"))
            .arg("--input")
            .arg("/does/not/exist.json")
            .output()?;
        assert!(!result.status.success(), "{result:?}");
        Ok(())
    }
}
