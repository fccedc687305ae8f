//! Statically-typed, interface-based C# backend.
//!
//! Every sub-client becomes an interface plus an implementation carrying
//! both synchronous and `...Async` methods. Models are positional records
//! and string enums. Optional values render as nullable `T?`.

use super::{Backend, ClientFlavor, doc_line, group_words};
use crate::models::{GeneratedType, ModelBody};
use crate::naming::{to_camel_case, to_pascal_case};
use crate::resolver::TypeRef;
use crate::signature::{MethodSignature, MethodVariant, ParameterPosition, SignatureParameter};
use crate::template_engine::TemplateEngine;
use crate::types::{GeneratedCode, GeneratedFile};
use crate::versioning::VersionModule;
use sdkgen_core::{Capability, GeneratorSettings, MediaType, Result, Target};
use serde::Serialize;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// C# code generation.
#[derive(Debug, Clone)]
pub struct CSharpBackend {
    settings: GeneratorSettings,
}

impl CSharpBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    fn parameter_declaration(&self, parameter: &SignatureParameter) -> String {
        let mut declaration = format!(
            "{} {}",
            self.render_type(&parameter.type_ref),
            identifier(&parameter.name)
        );

        if !parameter.required {
            declaration.push_str(" = default");
        }

        declaration
    }

    fn declaration(&self, signature: &MethodSignature, variant: MethodVariant) -> String {
        let return_type = match (&signature.return_type, variant) {
            (None, MethodVariant::Sync) => "void".to_string(),
            (None, MethodVariant::Async) => "Task".to_string(),
            (Some(type_ref), MethodVariant::Sync) => self.render_type(type_ref),
            (Some(type_ref), MethodVariant::Async) => format!("Task<{}>", self.render_type(type_ref)),
        };

        let parameters: Vec<_> = signature
            .parameters(variant)
            .map(|parameter| self.parameter_declaration(parameter))
            .collect();

        format!(
            "{return_type} {}({})",
            signature.method_name(variant),
            parameters.join(", ")
        )
    }

    fn to_string_code(&self, parameter: &SignatureParameter) -> String {
        let name = identifier(&parameter.name);
        let value = if parameter.type_ref.is_optional() {
            format!("{name}.Value")
        } else {
            name.clone()
        };

        match parameter.type_ref.inner() {
            TypeRef::DateTime => format!("{value}.ToString(\"o\", CultureInfo.InvariantCulture)"),
            TypeRef::Text => name,
            _ => format!("Convert.ToString({name}, CultureInfo.InvariantCulture)!"),
        }
    }

    fn content_code(parameter: &SignatureParameter) -> String {
        let name = identifier(&parameter.name);

        match parameter.position {
            ParameterPosition::Body(MediaType::OctetStream) if parameter.is_optional() => {
                format!("{name} is null ? default : new StreamContent({name})")
            }
            ParameterPosition::Body(MediaType::OctetStream) => format!("new StreamContent({name})"),
            _ => format!("JsonContent.Create({name}, options: Utilities.JsonOptions)"),
        }
    }

    fn version_context<'v>(&self, version: &'v VersionModule) -> VersionContext<'v> {
        VersionContext {
            namespace: self.settings.namespace.clone(),
            client_name: self.settings.client_name.clone(),
            version: version.version.type_name(),
            title: &version.title,
            sub_clients: version
                .sub_clients
                .iter()
                .map(|sub_client| SubClientEntry {
                    name: sub_client.name.clone(),
                    field: format!("_{}", to_camel_case(&sub_client.name)),
                })
                .collect(),
            sources: version
                .sub_clients
                .iter()
                .filter_map(|sub_client| sub_client.source(ClientFlavor::Combined))
                .collect(),
            models: version.models.iter().map(String::as_str).collect(),
        }
    }

    fn client_context(&self, versions: &[VersionModule]) -> ClientContext {
        let settings = &self.settings;

        ClientContext {
            namespace: settings.namespace.clone(),
            client_name: settings.client_name.clone(),
            exception_type: settings.exception_type.clone(),
            exception_code_prefix: settings.exception_code_prefix.clone(),
            configuration_header_key: settings.configuration_header_key.clone(),
            access_token: settings.has(Capability::AccessToken),
            refresh_token: settings.has(Capability::RefreshToken),
            web_assembly_streaming: settings.has(Capability::WebAssemblyStreaming),
            extended_features: settings.has(Capability::ExtendedFeatures),
            versions: versions
                .iter()
                .map(|version| VersionEntry {
                    name: version.version.type_name(),
                    title: version.title.clone(),
                })
                .collect(),
        }
    }
}

impl Backend for CSharpBackend {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn render_type(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Boolean => "bool".to_string(),
            TypeRef::Float64 => "double".to_string(),
            TypeRef::Int32 => "int".to_string(),
            TypeRef::Text => "string".to_string(),
            TypeRef::Uri => "Uri".to_string(),
            TypeRef::Guid => "Guid".to_string(),
            TypeRef::Duration => "TimeSpan".to_string(),
            TypeRef::DateTime => "DateTime".to_string(),
            TypeRef::Dynamic => "JsonElement".to_string(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::Sequence(item) => format!("IReadOnlyList<{}>", self.render_type(item)),
            TypeRef::Map(value) => {
                format!("IReadOnlyDictionary<string, {}>", self.render_type(value))
            }
            TypeRef::Optional(inner) => format!("{}?", self.render_type(inner)),
            TypeRef::ByteStream => "Stream".to_string(),
            TypeRef::RawResponse => "HttpResponseMessage".to_string(),
            TypeRef::Cancellation => "CancellationToken".to_string(),
        }
    }

    fn render_model(&self, model: &GeneratedType) -> String {
        let mut text = String::new();

        text.push_str("/// <summary>\n");
        text.push_str(&format!("/// {}\n", doc_line(model.description.as_deref())));
        text.push_str("/// </summary>\n");

        match &model.body {
            ModelBody::Enum(members) => {
                let members: Vec<_> = members
                    .iter()
                    .map(|member| {
                        format!(
                            "    /// <summary>\n    /// {}\n    /// </summary>\n    {}",
                            doc_line(member.documentation.as_deref()),
                            enum_member(&member.value)
                        )
                    })
                    .collect();

                text.push_str(&format!("public enum {}\n", model.name));
                text.push_str("{\n");
                text.push_str(&format!("{}\n", members.join(",\n\n")));
                text.push_str("}\n");
            }
            ModelBody::Record(fields) => {
                let mut parameters = Vec::with_capacity(fields.len());

                for field in fields {
                    let property = property_name(&field.name);
                    text.push_str(&format!(
                        "/// <param name=\"{property}\">{}</param>\n",
                        doc_line(field.description.as_deref())
                    ));

                    let attribute = if property.eq_ignore_ascii_case(&field.name) {
                        String::new()
                    } else {
                        format!("[property: JsonPropertyName(\"{}\")] ", field.name)
                    };

                    parameters.push(format!(
                        "{attribute}{} {property}",
                        self.render_type(&field.type_ref)
                    ));
                }

                text.push_str(&format!(
                    "public record {}({});\n",
                    model.name,
                    parameters.join(", ")
                ));
            }
        }

        text
    }

    fn client_flavors(&self) -> &'static [ClientFlavor] {
        &[ClientFlavor::Combined]
    }

    fn interface_method(
        &self,
        signature: &MethodSignature,
        variant: MethodVariant,
    ) -> Option<String> {
        let mut text = String::new();

        text.push_str("    /// <summary>\n");
        text.push_str(&format!("    /// {}\n", doc_line(signature.summary.as_deref())));
        text.push_str("    /// </summary>\n");

        for parameter in signature.parameters(variant) {
            text.push_str(&format!(
                "    /// <param name=\"{}\">{}</param>\n",
                identifier(&parameter.name).trim_start_matches('@'),
                doc_line(parameter.description.as_deref())
            ));
        }

        text.push_str(&format!("    {};\n", self.declaration(signature, variant)));

        Some(text)
    }

    fn implementation_method(&self, signature: &MethodSignature, variant: MethodVariant) -> String {
        let mut text = String::new();

        text.push_str("    /// <inheritdoc />\n");
        text.push_str(&format!("    public {}\n", self.declaration(signature, variant)));
        text.push_str("    {\n");
        text.push_str("        var __urlBuilder = new StringBuilder();\n");
        text.push_str(&format!("        __urlBuilder.Append(\"{}\");\n", signature.path));

        for parameter in signature.path_parameters() {
            text.push_str(&format!(
                "        __urlBuilder.Replace(\"{{{}}}\", Uri.EscapeDataString({}));\n",
                parameter.name,
                self.to_string_code(parameter)
            ));
        }

        let query: Vec<_> = signature.query_parameters().collect();

        if !query.is_empty() {
            text.push('\n');
            text.push_str("        var __queryValues = new Dictionary<string, string>();\n");
            text.push('\n');

            for parameter in query {
                let value = format!("Uri.EscapeDataString({})", self.to_string_code(parameter));

                if parameter.is_optional() {
                    text.push_str(&format!(
                        "        if ({} is not null)\n",
                        identifier(&parameter.name)
                    ));
                    text.push_str(&format!(
                        "            __queryValues[\"{}\"] = {value};\n",
                        parameter.name
                    ));
                } else {
                    text.push_str(&format!(
                        "        __queryValues[\"{}\"] = {value};\n",
                        parameter.name
                    ));
                }

                text.push('\n');
            }

            text.push_str("        var __query = \"?\" + string.Join('&', __queryValues.Select(entry => $\"{entry.Key}={entry.Value}\"));\n");
            text.push_str("        __urlBuilder.Append(__query);\n");
        }

        text.push('\n');
        text.push_str("        var __url = __urlBuilder.ToString();\n");

        let return_type = signature
            .return_type
            .as_ref()
            .map_or_else(|| "object".to_string(), |type_ref| self.render_type(type_ref));
        let accept = signature
            .accept
            .map_or_else(|| "default".to_string(), |media| format!("\"{media}\""));
        let content_type = signature
            .content_type()
            .map_or_else(|| "default".to_string(), |media| format!("\"{media}\""));
        let content = signature
            .body()
            .map_or_else(|| "default".to_string(), Self::content_code);
        let verb = signature.method.as_str();

        match variant {
            MethodVariant::Async => {
                text.push_str(&format!(
                    "        return ___client.InvokeAsync<{return_type}>(\"{verb}\", __url, {accept}, {content_type}, {content}, cancellationToken);\n"
                ));
            }
            MethodVariant::Sync => {
                let prefix = if signature.return_type.is_some() { "return " } else { "" };
                text.push_str(&format!(
                    "        {prefix}___client.Invoke<{return_type}>(\"{verb}\", __url, {accept}, {content_type}, {content});\n"
                ));
            }
        }

        text.push_str("    }\n");

        text
    }

    fn sub_client_source(
        &self,
        group: &str,
        _flavor: ClientFlavor,
        interface_methods: &[String],
        implementation_methods: &[String],
    ) -> String {
        let client_name = &self.settings.client_name;
        let mut text = String::new();

        text.push_str("/// <summary>\n");
        text.push_str(&format!("/// Provides methods to interact with {}.\n", group_words(group)));
        text.push_str("/// </summary>\n");
        text.push_str(&format!("public interface I{group}Client\n"));
        text.push_str("{\n");
        text.push_str(&interface_methods.join("\n"));
        text.push_str("}\n");
        text.push('\n');
        text.push_str("/// <inheritdoc />\n");
        text.push_str(&format!("public class {group}Client : I{group}Client\n"));
        text.push_str("{\n");
        text.push_str(&format!("    private {client_name}Client ___client;\n"));
        text.push('\n');
        text.push_str(&format!("    internal {group}Client({client_name}Client client)\n"));
        text.push_str("    {\n");
        text.push_str("        ___client = client;\n");
        text.push_str("    }\n");
        text.push('\n');
        text.push_str(&implementation_methods.join("\n"));
        text.push_str("}\n");

        text
    }

    fn render_files(
        &self,
        engine: &TemplateEngine<'_>,
        versions: &[VersionModule],
    ) -> Result<GeneratedCode> {
        let client_name = &self.settings.client_name;
        let mut code = GeneratedCode::new();

        let content = engine.render("csharp/client", &self.client_context(versions))?;
        code.add_file(GeneratedFile {
            path: format!("{client_name}Client.g.cs"),
            content,
        });

        for version in versions {
            let context = self.version_context(version);
            let content = engine.render("csharp/version", &context)?;

            code.add_file(GeneratedFile {
                path: format!("{client_name}Client.{}.g.cs", context.version),
                content,
            });

            tracing::debug!("Rendered C# version {}", context.version);
        }

        Ok(code)
    }
}

#[derive(Debug, Serialize)]
struct ClientContext {
    namespace: String,
    client_name: String,
    exception_type: String,
    exception_code_prefix: String,
    configuration_header_key: String,
    access_token: bool,
    refresh_token: bool,
    web_assembly_streaming: bool,
    extended_features: bool,
    versions: Vec<VersionEntry>,
}

#[derive(Debug, Serialize)]
struct VersionEntry {
    name: String,
    title: String,
}

#[derive(Debug, Serialize)]
struct VersionContext<'v> {
    namespace: String,
    client_name: String,
    version: String,
    title: &'v str,
    sub_clients: Vec<SubClientEntry>,
    sources: Vec<&'v str>,
    models: Vec<&'v str>,
}

#[derive(Debug, Serialize)]
struct SubClientEntry {
    name: String,
    field: String,
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parameter identifier: the description's name when usable, `@`-escaped keywords.
fn identifier(name: &str) -> String {
    let base = if is_identifier(name) {
        name.to_string()
    } else {
        to_camel_case(name)
    };

    if KEYWORDS.contains(&base.as_str()) {
        format!("@{base}")
    } else {
        base
    }
}

fn property_name(name: &str) -> String {
    let property = to_pascal_case(name);
    if property.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{property}")
    } else {
        property
    }
}

fn enum_member(value: &str) -> String {
    if is_identifier(value) {
        value.to_string()
    } else {
        property_name(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnumMember, RecordField};
    use crate::signature::CANCELLATION_PARAMETER;
    use sdkgen_core::HttpMethod;

    fn backend() -> CSharpBackend {
        CSharpBackend::new(GeneratorSettings::builder().client_name("Nexus").build())
    }

    fn parameter(name: &str, position: ParameterPosition, type_ref: TypeRef, required: bool) -> SignatureParameter {
        SignatureParameter {
            name: name.to_string(),
            position,
            type_ref,
            required,
            description: None,
        }
    }

    fn signature() -> MethodSignature {
        MethodSignature {
            name: "GetStream".to_string(),
            method: HttpMethod::Get,
            path: "/api/v1/data/{resourcePath}".to_string(),
            summary: Some("Gets the requested data.\nMore text.".to_string()),
            return_type: Some(TypeRef::RawResponse),
            accept: Some(MediaType::OctetStream),
            parameters: vec![
                parameter("resourcePath", ParameterPosition::Path, TypeRef::Text, true),
                parameter("begin", ParameterPosition::Query, TypeRef::DateTime, true),
                parameter(
                    "step",
                    ParameterPosition::Query,
                    TypeRef::Int32.into_optional(),
                    false,
                ),
                parameter(
                    CANCELLATION_PARAMETER,
                    ParameterPosition::Cancellation,
                    TypeRef::Cancellation,
                    false,
                ),
            ],
        }
    }

    #[test]
    fn test_interface_method() {
        let text = backend()
            .interface_method(&signature(), MethodVariant::Async)
            .unwrap();

        assert!(text.contains("/// Gets the requested data.\n"));
        assert!(!text.contains("More text."));
        assert!(text.contains(
            "Task<HttpResponseMessage> GetStreamAsync(string resourcePath, DateTime begin, int? step = default, CancellationToken cancellationToken = default);"
        ));
    }

    #[test]
    fn test_sync_declaration_has_no_cancellation() {
        let text = backend()
            .interface_method(&signature(), MethodVariant::Sync)
            .unwrap();
        assert!(text.contains("HttpResponseMessage GetStream(string resourcePath, DateTime begin, int? step = default);"));
    }

    #[test]
    fn test_implementation_method() {
        let text = backend().implementation_method(&signature(), MethodVariant::Sync);

        assert!(text.contains("__urlBuilder.Replace(\"{resourcePath}\", Uri.EscapeDataString(resourcePath));"));
        assert!(text.contains(
            "__queryValues[\"begin\"] = Uri.EscapeDataString(begin.ToString(\"o\", CultureInfo.InvariantCulture));"
        ));
        assert!(text.contains("if (step is not null)"));
        assert!(text.contains("Convert.ToString(step, CultureInfo.InvariantCulture)!"));
        assert!(text.contains(
            "return ___client.Invoke<HttpResponseMessage>(\"GET\", __url, \"application/octet-stream\", default, default);"
        ));
    }

    #[test]
    fn test_query_string_braces() {
        let text = backend().implementation_method(&signature(), MethodVariant::Async);

        assert!(text.contains("    {\n        var __urlBuilder = new StringBuilder();\n"));
        assert!(text.contains("__queryValues.Select(entry => $\"{entry.Key}={entry.Value}\"));\n"));
        assert!(text.contains("        __urlBuilder.Append(__query);\n"));
        assert!(text.ends_with("    }\n"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_void_implementation_with_body() {
        let signature = MethodSignature {
            name: "Create".to_string(),
            method: HttpMethod::Post,
            path: "/jobs".to_string(),
            summary: None,
            return_type: None,
            accept: None,
            parameters: vec![
                parameter(
                    "class",
                    ParameterPosition::Body(MediaType::Json),
                    TypeRef::Named("Job".to_string()),
                    true,
                ),
                parameter(
                    CANCELLATION_PARAMETER,
                    ParameterPosition::Cancellation,
                    TypeRef::Cancellation,
                    false,
                ),
            ],
        };

        let text = backend().implementation_method(&signature, MethodVariant::Sync);
        assert!(text.contains("public void Create(Job @class)"));
        assert!(text.contains(
            "        ___client.Invoke<object>(\"POST\", __url, default, \"application/json\", JsonContent.Create(@class, options: Utilities.JsonOptions));"
        ));

        let text = backend().implementation_method(&signature, MethodVariant::Async);
        assert!(text.contains("public Task CreateAsync(Job @class, CancellationToken cancellationToken = default)"));
    }

    #[test]
    fn test_render_record() {
        let model = GeneratedType {
            name: "Job".to_string(),
            description: Some("Description of a job.".to_string()),
            body: ModelBody::Record(vec![
                RecordField {
                    name: "id".to_string(),
                    type_ref: TypeRef::Guid,
                    description: Some("The identifier.".to_string()),
                },
                RecordField {
                    name: "exception-message".to_string(),
                    type_ref: TypeRef::Text.into_optional(),
                    description: None,
                },
            ]),
        };

        let text = backend().render_model(&model);
        assert!(text.contains("/// Description of a job."));
        assert!(text.contains("/// <param name=\"Id\">The identifier.</param>"));
        assert!(text.contains(
            "public record Job(Guid Id, [property: JsonPropertyName(\"exception-message\")] string? ExceptionMessage);"
        ));
    }

    #[test]
    fn test_render_enum() {
        let model = GeneratedType {
            name: "TaskStatus".to_string(),
            description: None,
            body: ModelBody::Enum(vec![
                EnumMember {
                    value: "Running".to_string(),
                    documentation: Some("Running".to_string()),
                },
                EnumMember {
                    value: "Faulted".to_string(),
                    documentation: Some("Faulted".to_string()),
                },
            ]),
        };

        let text = backend().render_model(&model);
        assert!(text.contains("public enum TaskStatus\n{\n"));
        assert!(text.contains("    Running,\n\n"));
        assert!(text.contains("    Faulted\n}"));
    }

    #[test]
    fn test_sub_client_source() {
        let text = backend().sub_client_source(
            "CatalogItems",
            ClientFlavor::Combined,
            &["    void A();\n".to_string()],
            &["    public void A() { }\n".to_string()],
        );

        assert!(text.contains("Provides methods to interact with catalog items."));
        assert!(text.contains("public interface ICatalogItemsClient"));
        assert!(text.contains("public class CatalogItemsClient : ICatalogItemsClient"));
        assert!(text.contains("private NexusClient ___client;"));
        assert!(text.contains("internal CatalogItemsClient(NexusClient client)"));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(identifier("resourcePath"), "resourcePath");
        assert_eq!(identifier("event"), "@event");
        assert_eq!(identifier("file-name"), "fileName");
        assert_eq!(property_name("2fa"), "_2fa");
    }
}
