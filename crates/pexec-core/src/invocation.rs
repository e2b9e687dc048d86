use pexec_model::{
    DEFAULT_NAMESPACE, ExecutionRequest, LabelSet, WorkloadKind, WorkloadReference,
};

use crate::CoreError;

/// Unvalidated invocation as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RawInvocation {
    /// Workload kind token, e.g. `deploy` or `po`.
    pub kind: String,
    /// Positional arguments after the kind: `[name] command...`.
    pub args: Vec<String>,
    pub namespace: Option<String>,
    /// Selector in `key1=value1,key2=value2` form.
    pub labels: Option<String>,
    pub container: Option<String>,
    pub ignore_hostname: bool,
}

/// Parsed, immutable request for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub workload: WorkloadReference,
    /// Explicit selector; always present for [`WorkloadKind::Pod`].
    pub selector: Option<LabelSet>,
    pub request: ExecutionRequest,
}

impl TryFrom<RawInvocation> for Invocation {
    type Error = CoreError;

    fn try_from(raw: RawInvocation) -> Result<Self, Self::Error> {
        let kind: WorkloadKind = raw.kind.parse()?;

        let selector = match raw.labels.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                Some(LabelSet::parse(s)?).filter(|labels| !labels.is_empty())
            }
            _ => None,
        };

        let (name, command) = if kind.is_controller() {
            let mut args = raw.args.into_iter();
            let name = args
                .next()
                .filter(|n| !n.is_empty())
                .ok_or(CoreError::MissingArguments("expected <name> <command...>"))?;
            let command: Vec<String> = args.collect();
            if command.is_empty() {
                return Err(CoreError::MissingArguments("expected <name> <command...>"));
            }
            (name, command)
        } else {
            if selector.is_none() {
                return Err(CoreError::MissingSelector { kind });
            }
            if raw.args.is_empty() {
                return Err(CoreError::MissingArguments("expected <command...>"));
            }
            (String::new(), raw.args)
        };

        let namespace = raw
            .namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let request = ExecutionRequest::new(command)?
            .with_container(raw.container.filter(|c| !c.is_empty()))
            .with_disambiguation(!raw.ignore_hostname);

        Ok(Self {
            workload: WorkloadReference::new(kind, name, namespace),
            selector,
            request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str, args: &[&str]) -> RawInvocation {
        RawInvocation {
            kind: kind.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn controller_invocation_takes_name_then_command() {
        let inv = Invocation::try_from(raw("deploy", &["nginx", "cat", "/etc/nginx/nginx.conf"]))
            .unwrap();
        assert_eq!(inv.workload.kind, WorkloadKind::Deployment);
        assert_eq!(inv.workload.name, "nginx");
        assert_eq!(inv.workload.namespace, "default");
        assert_eq!(inv.request.command(), ["cat", "/etc/nginx/nginx.conf"]);
        assert!(inv.request.disambiguate_output);
        assert!(inv.selector.is_none());
    }

    #[test]
    fn pod_invocation_has_no_name() {
        let mut r = raw("po", &["hostname"]);
        r.labels = Some("app=nginx".into());
        r.namespace = Some("web".into());
        r.ignore_hostname = true;
        r.container = Some("main".into());

        let inv = Invocation::try_from(r).unwrap();
        assert_eq!(inv.workload.kind, WorkloadKind::Pod);
        assert!(inv.workload.name.is_empty());
        assert_eq!(inv.workload.namespace, "web");
        assert_eq!(inv.selector.unwrap().get("app"), Some("nginx"));
        assert_eq!(inv.request.command(), ["hostname"]);
        assert_eq!(inv.request.container.as_deref(), Some("main"));
        assert!(!inv.request.disambiguate_output);
    }

    #[test]
    fn pod_without_selector_is_a_configuration_error() {
        let err = Invocation::try_from(raw("pod", &["ls"])).unwrap_err();
        assert!(matches!(err, CoreError::MissingSelector { kind: WorkloadKind::Pod }));
        assert!(err.is_configuration());

        let mut r = raw("pod", &["ls"]);
        r.labels = Some("  ".into());
        assert!(matches!(
            Invocation::try_from(r),
            Err(CoreError::MissingSelector { .. })
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Invocation::try_from(raw("job", &["x", "ls"])).unwrap_err();
        assert!(matches!(err, CoreError::UnknownKind(ref k) if k == "job"));
    }

    #[test]
    fn too_few_arguments_are_rejected() {
        assert!(matches!(
            Invocation::try_from(raw("ds", &["fluentd"])),
            Err(CoreError::MissingArguments(_))
        ));
        assert!(matches!(
            Invocation::try_from(raw("ss", &[])),
            Err(CoreError::MissingArguments(_))
        ));

        let mut r = raw("pod", &[]);
        r.labels = Some("app=x".into());
        assert!(matches!(
            Invocation::try_from(r),
            Err(CoreError::MissingArguments(_))
        ));
    }

    #[test]
    fn malformed_labels_are_rejected() {
        let mut r = raw("pod", &["ls"]);
        r.labels = Some("app".into());
        assert!(matches!(
            Invocation::try_from(r),
            Err(CoreError::InvalidLabels(_))
        ));
    }

    #[test]
    fn empty_namespace_and_container_fall_back_to_defaults() {
        let mut r = raw("deployment", &["api", "ls"]);
        r.namespace = Some(String::new());
        r.container = Some(String::new());
        let inv = Invocation::try_from(r).unwrap();
        assert_eq!(inv.workload.namespace, "default");
        assert!(inv.request.container.is_none());
    }
}
