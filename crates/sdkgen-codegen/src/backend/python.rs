//! Dynamically-typed, annotation-based Python backend.
//!
//! Sub-clients come in a synchronous `<Group>Client` and an asynchronous
//! `<Group>AsyncClient` class with identically named methods. Models are
//! frozen dataclasses and `Enum`s; optional values render as `Optional[T]`.

use super::{Backend, ClientFlavor, doc_line, group_words};
use crate::models::{GeneratedType, ModelBody};
use crate::naming::{first_char_to_upper, to_snake_case};
use crate::resolver::TypeRef;
use crate::signature::{MethodSignature, MethodVariant, ParameterPosition, SignatureParameter};
use crate::template_engine::TemplateEngine;
use crate::types::{GeneratedCode, GeneratedFile};
use crate::versioning::VersionModule;
use sdkgen_core::{Capability, GeneratorSettings, MediaType, Result, Target};
use serde::Serialize;

/// Keywords plus module names the generated method bodies rely on.
const RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "self", "json", "quote",
];

/// Python code generation.
#[derive(Debug, Clone)]
pub struct PythonBackend {
    settings: GeneratorSettings,
}

impl PythonBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    fn parameter_declaration(&self, parameter: &SignatureParameter) -> String {
        let mut declaration = format!(
            "{}: {}",
            identifier(&parameter.name),
            self.render_type(&parameter.type_ref)
        );

        if !parameter.required {
            declaration.push_str(" = None");
        }

        declaration
    }

    fn content_code(parameter: &SignatureParameter) -> String {
        let name = identifier(&parameter.name);

        match parameter.position {
            ParameterPosition::Body(MediaType::OctetStream) => name,
            _ if parameter.is_optional() => {
                format!("None if {name} is None else json.dumps(JsonEncoder.encode({name}))")
            }
            _ => format!("json.dumps(JsonEncoder.encode({name}))"),
        }
    }

    fn flavor_context(&self, flavor: ClientFlavor) -> FlavorContext {
        let is_async = flavor == ClientFlavor::Async;

        FlavorContext {
            suffix: flavor.class_suffix(),
            def: if is_async { "async def" } else { "def" },
            awaits: if is_async { "await " } else { "" },
            aclose: if is_async { "aclose" } else { "close" },
            read: if is_async { "aread" } else { "read" },
            enter: if is_async { "aenter" } else { "enter" },
            exit: if is_async { "aexit" } else { "exit" },
            http_client: if is_async { "AsyncClient" } else { "Client" },
            refresher: if is_async {
                "Callable[[], Awaitable[str]]"
            } else {
                "Callable[[], str]"
            },
        }
    }

    fn client_context(&self, versions: &[VersionModule]) -> ClientContext {
        let settings = &self.settings;

        ClientContext {
            client_name: settings.client_name.clone(),
            exception_type: settings.exception_type.clone(),
            exception_code_prefix: settings.exception_code_prefix.clone(),
            configuration_header_key: settings.configuration_header_key.clone(),
            access_token: settings.has(Capability::AccessToken),
            refresh_token: settings.has(Capability::RefreshToken),
            extended_features: settings.has(Capability::ExtendedFeatures),
            versions: versions
                .iter()
                .map(|version| VersionEntry {
                    module: version.version.as_str().to_string(),
                    type_name: version.version.type_name(),
                    title: version.title.clone(),
                })
                .collect(),
            flavors: self
                .client_flavors()
                .iter()
                .map(|flavor| self.flavor_context(*flavor))
                .collect(),
        }
    }

    fn version_context<'v>(&self, version: &'v VersionModule) -> VersionContext<'v> {
        let sub_clients: Vec<_> = version
            .sub_clients
            .iter()
            .map(|sub_client| SubClientEntry {
                name: sub_client.name.clone(),
                property: to_snake_case(&sub_client.name),
            })
            .collect();

        let flavors = self
            .client_flavors()
            .iter()
            .map(|flavor| VersionFlavor {
                suffix: flavor.class_suffix(),
                sources: version
                    .sub_clients
                    .iter()
                    .filter_map(|sub_client| sub_client.source(*flavor))
                    .collect(),
                sub_clients: sub_clients.clone(),
            })
            .collect();

        VersionContext {
            client_name: self.settings.client_name.clone(),
            type_name: version.version.type_name(),
            title: &version.title,
            models: version.models.iter().map(String::as_str).collect(),
            flavors,
        }
    }
}

impl Backend for PythonBackend {
    fn target(&self) -> Target {
        Target::Python
    }

    fn render_type(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Boolean => "bool".to_string(),
            TypeRef::Float64 => "float".to_string(),
            TypeRef::Int32 => "int".to_string(),
            TypeRef::Text | TypeRef::Uri => "str".to_string(),
            TypeRef::Guid => "UUID".to_string(),
            TypeRef::Duration => "timedelta".to_string(),
            TypeRef::DateTime => "datetime".to_string(),
            TypeRef::Dynamic => "object".to_string(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::Sequence(item) => format!("list[{}]", self.render_type(item)),
            TypeRef::Map(value) => format!("dict[str, {}]", self.render_type(value)),
            TypeRef::Optional(inner) => format!("Optional[{}]", self.render_type(inner)),
            TypeRef::ByteStream => "Union[bytes, Iterable[bytes], AsyncIterable[bytes]]".to_string(),
            TypeRef::RawResponse => "Response".to_string(),
            TypeRef::Cancellation => "None".to_string(),
        }
    }

    fn render_model(&self, model: &GeneratedType) -> String {
        let mut text = String::new();
        let description = doc_line(model.description.as_deref());

        match &model.body {
            ModelBody::Enum(members) => {
                text.push_str(&format!("class {}(Enum):\n", model.name));
                text.push_str(&format!("    \"\"\"{description}\"\"\"\n"));

                for member in members {
                    text.push('\n');
                    text.push_str(&format!(
                        "    {} = \"{}\"\n",
                        enum_member(&member.value),
                        escape(&member.value)
                    ));
                    text.push_str(&format!(
                        "    \"\"\"{}\"\"\"\n",
                        doc_line(member.documentation.as_deref())
                    ));
                }
            }
            ModelBody::Record(fields) => {
                text.push_str("@dataclass(frozen=True)\n");
                text.push_str(&format!("class {}:\n", model.name));
                text.push_str("    \"\"\"\n");
                text.push_str(&format!("    {description}\n"));
                text.push('\n');
                text.push_str("    Args:\n");

                for field in fields {
                    text.push_str(&format!(
                        "        {}: {}\n",
                        identifier(&field.name),
                        doc_line(field.description.as_deref())
                    ));
                }

                text.push_str("    \"\"\"\n");

                for field in fields {
                    let name = identifier(&field.name);
                    let metadata = if json_name_of(&name) == field.name {
                        String::new()
                    } else {
                        format!(" = field(metadata={{\"json_name\": \"{}\"}})", escape(&field.name))
                    };

                    text.push('\n');
                    text.push_str(&format!(
                        "    {name}: {}{metadata}\n",
                        self.render_type(&field.type_ref)
                    ));
                    text.push_str(&format!(
                        "    \"\"\"{}\"\"\"\n",
                        doc_line(field.description.as_deref())
                    ));
                }
            }
        }

        text
    }

    fn client_flavors(&self) -> &'static [ClientFlavor] {
        &[ClientFlavor::Sync, ClientFlavor::Async]
    }

    fn interface_method(&self, _signature: &MethodSignature, _variant: MethodVariant) -> Option<String> {
        None
    }

    fn implementation_method(&self, signature: &MethodSignature, variant: MethodVariant) -> String {
        let parameters: Vec<_> = signature.parameters(MethodVariant::Sync).collect();

        let declarations: Vec<_> = std::iter::once("self".to_string())
            .chain(parameters.iter().map(|parameter| self.parameter_declaration(parameter)))
            .collect();

        let return_type = signature
            .return_type
            .as_ref()
            .map_or_else(|| "None".to_string(), |type_ref| self.render_type(type_ref));

        let annotation = match variant {
            MethodVariant::Sync => return_type.clone(),
            MethodVariant::Async => format!("Awaitable[{return_type}]"),
        };

        let mut text = String::new();

        text.push_str(&format!(
            "    def {}({}) -> {annotation}:\n",
            to_snake_case(&signature.name),
            declarations.join(", ")
        ));
        text.push_str("        \"\"\"\n");
        text.push_str(&format!("        {}\n", doc_line(signature.summary.as_deref())));

        if !parameters.is_empty() {
            text.push('\n');
            text.push_str("        Args:\n");

            for parameter in &parameters {
                text.push_str(&format!(
                    "            {}: {}\n",
                    identifier(&parameter.name),
                    doc_line(parameter.description.as_deref())
                ));
            }
        }

        text.push_str("        \"\"\"\n");
        text.push('\n');
        text.push_str(&format!("        __url = \"{}\"\n", signature.path));

        for parameter in signature.path_parameters() {
            text.push_str(&format!(
                "        __url = __url.replace(\"{{{}}}\", quote(_to_string({}), safe=\"\"))\n",
                parameter.name,
                identifier(&parameter.name)
            ));
        }

        let query: Vec<_> = signature.query_parameters().collect();

        if !query.is_empty() {
            text.push('\n');
            text.push_str("        __query_values: dict[str, str] = {}\n");
            text.push('\n');

            for parameter in query {
                let name = identifier(&parameter.name);
                let value = format!("quote(_to_string({name}), safe=\"\")");

                if parameter.is_optional() {
                    text.push_str(&format!("        if {name} is not None:\n"));
                    text.push_str(&format!(
                        "            __query_values[\"{}\"] = {value}\n",
                        parameter.name
                    ));
                } else {
                    text.push_str(&format!(
                        "        __query_values[\"{}\"] = {value}\n",
                        parameter.name
                    ));
                }

                text.push('\n');
            }

            text.push_str("        __query: str = \"?\" + \"&\".join(f\"{key}={value}\" for (key, value) in __query_values.items())\n");
            text.push_str("        __url += __query\n");
        }

        let type_argument = if signature.return_type.is_some() {
            return_type
        } else {
            "type(None)".to_string()
        };
        let accept = signature
            .accept
            .map_or_else(|| "None".to_string(), |media| format!("\"{media}\""));
        let content_type = signature
            .content_type()
            .map_or_else(|| "None".to_string(), |media| format!("\"{media}\""));
        let content = signature
            .body()
            .map_or_else(|| "None".to_string(), Self::content_code);

        text.push('\n');
        text.push_str(&format!(
            "        return self.___client._invoke({type_argument}, \"{}\", __url, {accept}, {content_type}, {content})\n",
            signature.method.as_str()
        ));

        text
    }

    fn sub_client_source(
        &self,
        group: &str,
        flavor: ClientFlavor,
        _interface_methods: &[String],
        implementation_methods: &[String],
    ) -> String {
        let suffix = flavor.class_suffix();
        let client_name = &self.settings.client_name;
        let mut text = String::new();

        text.push_str(&format!("class {group}{suffix}Client:\n"));
        text.push_str(&format!(
            "    \"\"\"Provides methods to interact with {}.\"\"\"\n",
            group_words(group)
        ));
        text.push('\n');
        text.push_str(&format!("    ___client: {client_name}{suffix}Client\n"));
        text.push('\n');
        text.push_str(&format!("    def __init__(self, client: {client_name}{suffix}Client):\n"));
        text.push_str("        self.___client = client\n");

        for method in implementation_methods {
            text.push('\n');
            text.push_str(method);
        }

        text
    }

    fn render_files(
        &self,
        engine: &TemplateEngine<'_>,
        versions: &[VersionModule],
    ) -> Result<GeneratedCode> {
        let mut code = GeneratedCode::new();
        let client = self.client_context(versions);

        code.add_file(GeneratedFile {
            path: "_shared.py".to_string(),
            content: engine.render("python/shared", &client)?,
        });

        code.add_file(GeneratedFile {
            path: "_client.py".to_string(),
            content: engine.render("python/client", &client)?,
        });

        for version in versions {
            let content = engine.render("python/version", &self.version_context(version))?;

            code.add_file(GeneratedFile {
                path: format!("{}.py", version.version.as_str()),
                content,
            });

            tracing::debug!("Rendered Python version {}", version.version);
        }

        code.add_file(GeneratedFile {
            path: "__init__.py".to_string(),
            content: engine.render("python/init", &client)?,
        });

        Ok(code)
    }
}

#[derive(Debug, Serialize)]
struct ClientContext {
    client_name: String,
    exception_type: String,
    exception_code_prefix: String,
    configuration_header_key: String,
    access_token: bool,
    refresh_token: bool,
    extended_features: bool,
    versions: Vec<VersionEntry>,
    flavors: Vec<FlavorContext>,
}

#[derive(Debug, Serialize)]
struct VersionEntry {
    module: String,
    type_name: String,
    title: String,
}

/// Keywords that differ between the synchronous and asynchronous root client.
#[derive(Debug, Serialize)]
struct FlavorContext {
    suffix: &'static str,
    def: &'static str,
    awaits: &'static str,
    aclose: &'static str,
    read: &'static str,
    enter: &'static str,
    exit: &'static str,
    http_client: &'static str,
    refresher: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionContext<'v> {
    client_name: String,
    type_name: String,
    title: &'v str,
    models: Vec<&'v str>,
    flavors: Vec<VersionFlavor<'v>>,
}

#[derive(Debug, Serialize)]
struct VersionFlavor<'v> {
    suffix: &'static str,
    sources: Vec<&'v str>,
    sub_clients: Vec<SubClientEntry>,
}

#[derive(Debug, Clone, Serialize)]
struct SubClientEntry {
    name: String,
    property: String,
}

/// snake_case identifier with a trailing `_` for reserved words.
fn identifier(name: &str) -> String {
    let mut snake = to_snake_case(name);

    if snake.is_empty() || snake.starts_with(|c: char| c.is_ascii_digit()) {
        snake.insert(0, '_');
    }

    if RESERVED.contains(&snake.as_str()) {
        snake.push('_');
    }

    snake
}

/// JSON key the runtime encoder derives from a field name when no
/// `json_name` metadata is present.
fn json_name_of(field: &str) -> String {
    let mut parts = field.split('_').filter(|part| !part.is_empty());

    parts.next().map_or_else(String::new, |first| {
        parts.fold(first.to_string(), |mut name, part| {
            name.push_str(&first_char_to_upper(part));
            name
        })
    })
}

fn enum_member(value: &str) -> String {
    let name = to_snake_case(value).to_uppercase();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("VALUE_{name}")
    } else {
        name
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
