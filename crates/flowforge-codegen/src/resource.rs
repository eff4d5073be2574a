// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Resource artifact generation.
//!
//! [`ResourceGenerator`] turns one process definition into a REST-style
//! resource artifact by running a fixed pass pipeline over the parsed
//! skeleton template: rename, signal-endpoint synthesis, security
//! annotations, user-task specialization, placeholder interpolation,
//! dependency wiring, pruning, validation annotations, member ordering,
//! and serialization. The pipeline is strictly ordered and never re-runs
//! a pass; a failed generation discards the artifact entirely.

use serde_json::Value;
use tracing::debug;

use flowforge_model::{ProcessDefinition, SignalMap, UserTaskDescriptor};

use crate::assembler::{self, GeneratedFile};
use crate::context::GeneratorContext;
use crate::di::DependencyInjectionAnnotator;
use crate::errors::CodegenError;
use crate::templates;
use crate::tree::{
    Annotation, CallExpr, Expr, Field, Member, Method, Param, Stmt, TypeDecl, TypeRef,
};
use crate::tree::{parser, printer};
use crate::visitor::capitalize;

const PROCESS_NAME_TOKEN: &str = "$name$";
const PROCESS_ID_TOKEN: &str = "$id$";
const DOCUMENTATION_TOKEN: &str = "$documentation$";
const CLAZZ_TOKEN: &str = "$Clazz$";
const TYPE_TOKEN: &str = "$Type$";
const TASK_NAME_TOKEN: &str = "$taskname$";
const TASK_INPUT_TOKEN: &str = "$TaskInput$";
const TASK_OUTPUT_TOKEN: &str = "$TaskOutput$";

const SECURITY_ROLES_KEY: &str = "securityRoles";
const DOCUMENTATION_KEY: &str = "Documentation";

/// HTTP-style operation annotations that take blanket role restrictions.
/// User-task endpoints are excluded by pass ordering, not by this list.
const SECURED_OPERATIONS: &[&str] = &["POST", "GET", "PUT", "DELETE"];

/// Generates the REST resource artifact for one process definition.
pub struct ResourceGenerator<'a> {
    context: &'a GeneratorContext,
    process: &'a ProcessDefinition,
    package_name: String,
    process_id: String,
    process_name: String,
    resource_class_name: String,
    relative_path: String,
    model_fqcn: String,
    data_class_name: String,
    process_class_name: String,
    app_canonical_name: String,
    annotator: Option<Box<dyn DependencyInjectionAnnotator>>,
    user_tasks: Option<Vec<UserTaskDescriptor>>,
    signals: Option<SignalMap>,
    startable: bool,
}

impl<'a> ResourceGenerator<'a> {
    /// Create a generator for the given process.
    ///
    /// `model_fqcn` and `process_fqcn` are the fully qualified names of
    /// the process data model and the process implementation;
    /// `app_canonical_name` is the application holder type used for
    /// direct initialization when dependency injection is disabled.
    pub fn new(
        context: &'a GeneratorContext,
        process: &'a ProcessDefinition,
        model_fqcn: impl Into<String>,
        process_fqcn: impl Into<String>,
        app_canonical_name: impl Into<String>,
    ) -> Self {
        let model_fqcn = model_fqcn.into();
        let package_name = process.package_name.clone();
        let process_id = process.id.clone();
        let process_name = process.simple_name().to_string();
        let resource_class_name = format!("{}Resource", capitalize(&process_name));
        let relative_path = format!(
            "{}/{}.java",
            package_name.replace('.', "/"),
            resource_class_name
        );
        let data_class_name = match model_fqcn.rfind('.') {
            Some(idx) => model_fqcn[idx + 1..].to_string(),
            None => model_fqcn.clone(),
        };
        Self {
            context,
            process,
            package_name,
            process_id,
            process_name,
            resource_class_name,
            relative_path,
            model_fqcn,
            data_class_name,
            process_class_name: process_fqcn.into(),
            app_canonical_name: app_canonical_name.into(),
            annotator: None,
            user_tasks: None,
            signals: None,
            startable: false,
        }
    }

    /// Enable dependency-injection mode with the given annotator.
    pub fn with_dependency_injection(
        mut self,
        annotator: Box<dyn DependencyInjectionAnnotator>,
    ) -> Self {
        self.annotator = Some(annotator);
        self
    }

    /// Supply the process's user tasks.
    pub fn with_user_tasks(mut self, user_tasks: Vec<UserTaskDescriptor>) -> Self {
        self.user_tasks = Some(user_tasks);
        self
    }

    /// Supply the process's signal declarations.
    pub fn with_signals(mut self, signals: SignalMap) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Declare whether the process is startable through the creation
    /// endpoint.
    pub fn with_triggers(mut self, startable: bool) -> Self {
        self.startable = startable;
        self
    }

    /// Name of the generated resource class.
    pub fn class_name(&self) -> &str {
        &self.resource_class_name
    }

    /// Package-relative path of the generated file.
    pub fn generated_file_path(&self) -> &str {
        &self.relative_path
    }

    /// Run the pass pipeline and produce the artifact.
    pub fn generate(&self) -> Result<GeneratedFile, CodegenError> {
        debug!(process = %self.process_id, "generating resource artifact");

        let mut unit = parser::parse(templates::resource_template()).map_err(|source| {
            CodegenError::TemplateParse {
                template: templates::RESOURCE_TEMPLATE_NAME.to_string(),
                source,
            }
        })?;
        unit.package = Some(self.package_name.clone());
        unit.imports.push(self.model_fqcn.clone());
        unit.imports.push(format!("{}Output", self.model_fqcn));

        let decl = unit
            .primary_type_mut()
            .ok_or_else(|| CodegenError::MalformedTemplate {
                template: templates::RESOURCE_TEMPLATE_NAME.to_string(),
            })?;
        decl.name = self.resource_class_name.clone();

        if let Some(signals) = &self.signals {
            for (index, (signal, payload)) in signals.iter().enumerate() {
                let method = self.signal_method(index, signal, payload.as_deref());
                decl.members.push(Member::Method(method));
            }
        }

        // before user tasks are cloned in: task endpoints restrict access
        // through per-assignment authorization, not blanket roles
        self.apply_security_roles(decl);

        if let Some(user_tasks) = &self.user_tasks {
            self.apply_user_tasks(decl, user_tasks)?;
        }

        self.interpolate_strings(decl);
        self.interpolate_types(decl);
        self.interpolate_method_names(decl);

        self.wire_dependencies(decl);
        self.prune_creation_endpoint(decl);

        if let Some(annotator) = &self.annotator {
            annotator.with_application_component(decl);
        }

        self.apply_validation(decl);

        assembler::sort_members(decl);
        Ok(assembler::assemble(&unit, self.relative_path.clone()))
    }

    /// Synthesize the endpoint method for one signal declaration.
    fn signal_method(&self, index: usize, signal: &str, payload: Option<&str>) -> Method {
        let mut annotations = vec![
            Annotation::marker("POST"),
            Annotation::string("Path", format!("/{{id}}/{}", signal)),
            Annotation::expr("Produces", Expr::name("MediaType.APPLICATION_JSON")),
        ];
        let mut params = vec![Param {
            annotations: vec![Annotation::string("PathParam", "id")],
            ty: TypeRef::new("String"),
            name: "id".to_string(),
        }];
        if let Some(payload) = payload {
            annotations.push(Annotation::expr(
                "Consumes",
                Expr::name("MediaType.APPLICATION_JSON"),
            ));
            params.push(Param::new(TypeRef::new(payload), "data"));
        }

        let find_instance = Expr::Call(CallExpr::chained(
            Expr::Call(CallExpr::chained(
                Expr::Call(CallExpr::on("process", "instances", vec![])),
                "findById",
                vec![Expr::name("id")],
            )),
            "orElse",
            vec![Expr::Null],
        ));
        let signal_value = Expr::Call(CallExpr::on(
            "Sig",
            "of",
            vec![
                Expr::str(signal),
                if payload.is_some() {
                    Expr::name("data")
                } else {
                    Expr::Null
                },
            ],
        ));
        let body = vec![
            Stmt::Local {
                ty: TypeRef::generic(
                    "ProcessInstance",
                    vec![TypeRef::new(self.model_fqcn.clone())],
                ),
                name: "pi".to_string(),
                init: Some(find_instance),
            },
            Stmt::If {
                cond: Expr::Eq(Box::new(Expr::name("pi")), Box::new(Expr::Null)),
                then: vec![Stmt::Return(Some(Expr::Null))],
            },
            Stmt::Expr(Expr::Call(CallExpr::on("pi", "send", vec![signal_value]))),
            Stmt::Return(Some(Expr::Call(CallExpr::function(
                "getModel",
                vec![Expr::name("pi")],
            )))),
        ];

        Method {
            annotations,
            modifiers: vec!["public".to_string()],
            return_ty: TypeRef::new(format!("{}Output", self.model_fqcn)),
            name: format!("signal_{}", index),
            params,
            body,
        }
    }

    /// Attach the process's role list to every HTTP-annotated member.
    fn apply_security_roles(&self, decl: &mut TypeDecl) {
        let Some(annotator) = &self.annotator else {
            return;
        };
        let Some(roles_entry) = self.process.metadata_string(SECURITY_ROLES_KEY) else {
            return;
        };
        let roles: Vec<String> = roles_entry
            .split(',')
            .map(|role| role.trim().to_string())
            .collect();
        for method in decl.methods_mut() {
            let secured = method
                .annotations
                .iter()
                .any(|a| SECURED_OPERATIONS.contains(&a.name.as_str()));
            if secured {
                annotator.with_security_roles(method, &roles);
            }
        }
    }

    /// Clone the user-task skeleton's methods per task and substitute the
    /// task's placeholders across the whole artifact.
    fn apply_user_tasks(
        &self,
        decl: &mut TypeDecl,
        user_tasks: &[UserTaskDescriptor],
    ) -> Result<(), CodegenError> {
        let task_unit = parser::parse(templates::user_task_template()).map_err(|source| {
            CodegenError::TemplateParse {
                template: templates::USER_TASK_TEMPLATE_NAME.to_string(),
                source,
            }
        })?;
        let task_decl = task_unit
            .type_decl
            .ok_or_else(|| CodegenError::MalformedTemplate {
                template: templates::USER_TASK_TEMPLATE_NAME.to_string(),
            })?;

        for task in user_tasks {
            for member in &task_decl.members {
                let Member::Method(method) = member else {
                    continue;
                };
                let mut cloned = method.clone();
                cloned.name = format!("{}_{}", cloned.name, task.id);
                decl.members.push(Member::Method(cloned));
            }

            // the task's placeholders may occur anywhere already emitted,
            // so the rewrite covers the whole declaration
            let task_name = task.normalized_name();
            decl.for_each_string_mut(&mut |s| {
                *s = s.replace(TASK_NAME_TOKEN, &task_name);
            });
            decl.for_each_type_mut(&mut |ty| {
                ty.name = ty
                    .name
                    .replace(TASK_INPUT_TOKEN, &task.input_model_name)
                    .replace(TASK_OUTPUT_TOKEN, &task.output_model_name);
            });
            decl.for_each_name_mut(&mut |name| {
                *name = name
                    .replace(TASK_INPUT_TOKEN, &task.input_model_name)
                    .replace(TASK_OUTPUT_TOKEN, &task.output_model_name);
            });
        }
        Ok(())
    }

    fn interpolate_strings(&self, decl: &mut TypeDecl) {
        let documentation = match self.process.metadata.get(DOCUMENTATION_KEY) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => self.process_name.clone(),
        };
        decl.for_each_string_mut(&mut |s| {
            *s = s
                .replace(PROCESS_NAME_TOKEN, &self.process_name)
                .replace(PROCESS_ID_TOKEN, &self.process_id)
                .replace(DOCUMENTATION_TOKEN, &documentation);
        });
    }

    fn interpolate_types(&self, decl: &mut TypeDecl) {
        decl.for_each_type_mut(&mut |ty| {
            ty.name = ty
                .name
                .replace(CLAZZ_TOKEN, &self.resource_class_name)
                .replace(TYPE_TOKEN, &self.data_class_name);
        });
    }

    fn interpolate_method_names(&self, decl: &mut TypeDecl) {
        for method in decl.methods_mut() {
            method.name = method.name.replace(PROCESS_NAME_TOKEN, &self.process_name);
        }
    }

    /// Annotate the holder fields for injection, or initialize them
    /// directly when dependency injection is disabled.
    fn wire_dependencies(&self, decl: &mut TypeDecl) {
        if let Some(annotator) = &self.annotator {
            for field in decl.fields_mut() {
                if is_process_field(field) {
                    annotator.with_named_injection(field, &self.process_id);
                } else if is_application_field(field) {
                    annotator.with_injection(field);
                }
            }
        } else {
            for field in decl.fields_mut() {
                if is_process_field(field) {
                    field.init = Some(Expr::New(TypeRef::new(self.process_class_name.clone())));
                } else if is_application_field(field) {
                    field.init = Some(Expr::New(TypeRef::new(self.app_canonical_name.clone())));
                }
            }
        }
    }

    /// Remove the creation endpoint when the process cannot be started
    /// from outside.
    fn prune_creation_endpoint(&self, decl: &mut TypeDecl) {
        if self.startable && self.process.is_public() {
            return;
        }
        let create_name = format!("createResource_{}", self.process_name);
        decl.members.retain(|member| member.name() != create_name);
    }

    /// Attach validation annotations to every inbound-model parameter.
    fn apply_validation(&self, decl: &mut TypeDecl) {
        if !self.context.validation_supported() {
            return;
        }
        let input_type = format!("{}Input", self.data_class_name);
        for method in decl.methods_mut() {
            for param in &mut method.params {
                if printer::render_type(&param.ty) == input_type {
                    param
                        .annotations
                        .push(Annotation::marker("javax.validation.Valid"));
                    param
                        .annotations
                        .push(Annotation::marker("javax.validation.constraints.NotNull"));
                }
            }
        }
    }
}

fn is_process_field(field: &Field) -> bool {
    field.ty.name.starts_with("Process")
}

fn is_application_field(field: &Field) -> bool {
    field.ty.name.starts_with("Application")
}
