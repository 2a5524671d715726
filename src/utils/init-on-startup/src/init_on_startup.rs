// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use dill::{Builder, BuilderExt, Catalog, TypecastBuilder};
use internal_error::{InternalError, ResultIntoInternal};
use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type JobName = &'static str;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait InitOnStartup: Send + Sync {
    /// Performs initialization procedure.
    /// The operation is expected to be idempotent
    async fn run_initialization(&self) -> Result<(), InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct InitOnStartupMeta {
    pub job_name: JobName,
    pub depends_on: &'static [JobName],
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum StartupJobsError {
    #[error(transparent)]
    JobNameNonUnique(StartupJobsNonUniqueNameError),

    #[error(transparent)]
    DependsOnUnresolved(StartupJobsDependsOnUnresolvedError),

    #[error(transparent)]
    DependsOnLoop(StartupJobsDependsOnLoopError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Startup job name '{job_name}' is not unique")]
pub struct StartupJobsNonUniqueNameError {
    pub job_name: JobName,
}

#[derive(Error, Debug)]
#[error("Startup job name '{job_name}' depends on unresolved job '{unresolved_depends_on}'")]
pub struct StartupJobsDependsOnUnresolvedError {
    pub job_name: JobName,
    pub unresolved_depends_on: JobName,
}

#[derive(Error, Debug)]
#[error("Startup job name '{job_name}' forms a dependency loop on itself")]
pub struct StartupJobsDependsOnLoopError {
    pub job_name: JobName,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

type JobBuildersByName<'a> =
    HashMap<JobName, (TypecastBuilder<'a, dyn InitOnStartup + 'static>, InitOnStartupMeta)>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Runs every [`InitOnStartup`] job registered in the catalog, dependencies
/// first. Fails before running anything if the dependency declarations are
/// inconsistent.
#[tracing::instrument(level = "debug", skip_all)]
pub async fn run_startup_jobs(catalog: &Catalog) -> Result<(), StartupJobsError> {
    let job_builders_by_name = {
        let mut job_builders_by_name: JobBuildersByName<'_> = HashMap::new();

        for startup_job_builder in catalog.builders_for::<dyn InitOnStartup>() {
            let metadata = get_startup_job_metadata(&startup_job_builder);
            let job_name = metadata.job_name;

            if job_builders_by_name
                .insert(job_name, (startup_job_builder, metadata))
                .is_some()
            {
                return Err(StartupJobsError::JobNameNonUnique(
                    StartupJobsNonUniqueNameError { job_name },
                ));
            }
        }

        job_builders_by_name
    };
    tracing::debug!("Defined {} startup jobs", job_builders_by_name.len());

    check_startup_job_dependencies(&job_builders_by_name)?;

    let topological_order = jobs_topological_order(&build_job_graph(&job_builders_by_name))?;
    tracing::debug!("Topological order of startup jobs: {topological_order:?}");

    for job_name in topological_order {
        let (job_builder, _) = job_builders_by_name
            .get(job_name)
            .expect("Job builder must be present");

        let job = job_builder.get(catalog).int_err()?;

        tracing::info!(job_name, "Running startup job");
        job.run_initialization().await?;
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn get_startup_job_metadata(
    startup_job_builder: &TypecastBuilder<'_, dyn InitOnStartup + 'static>,
) -> InitOnStartupMeta {
    let all_metadata: Vec<&InitOnStartupMeta> = startup_job_builder.metadata_get_all();
    assert!(
        all_metadata.len() == 1,
        "Must define exactly one `InitOnStartupMeta` record for a startup job {}",
        startup_job_builder.instance_type_name()
    );
    (*all_metadata[0]).clone()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn check_startup_job_dependencies(
    job_builders_by_name: &JobBuildersByName<'_>,
) -> Result<(), StartupJobsError> {
    for (_, job_metadata) in job_builders_by_name.values() {
        for depends_on in job_metadata.depends_on {
            if !job_builders_by_name.contains_key(depends_on) {
                return Err(StartupJobsError::DependsOnUnresolved(
                    StartupJobsDependsOnUnresolvedError {
                        job_name: job_metadata.job_name,
                        unresolved_depends_on: depends_on,
                    },
                ));
            }
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn build_job_graph(job_builders_by_name: &JobBuildersByName<'_>) -> StableDiGraph<JobName, ()> {
    let mut job_graph: StableDiGraph<JobName, ()> = StableDiGraph::new();
    let mut job_node_indices: HashMap<JobName, NodeIndex> = HashMap::new();

    for (_, job_metadata) in job_builders_by_name.values() {
        let node_index = job_graph.add_node(job_metadata.job_name);
        job_node_indices.insert(job_metadata.job_name, node_index);
    }

    for (_, job_metadata) in job_builders_by_name.values() {
        let node_index = job_node_indices[job_metadata.job_name];

        for depends_on in job_metadata.depends_on {
            let dependency_index = job_node_indices[depends_on];
            job_graph.add_edge(dependency_index, node_index, ());
        }
    }

    job_graph
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn jobs_topological_order(
    job_graph: &StableDiGraph<JobName, ()>,
) -> Result<Vec<JobName>, StartupJobsError> {
    match toposort(job_graph, None) {
        Ok(nodes_order) => Ok(nodes_order
            .into_iter()
            .map(|node_index| job_graph[node_index])
            .collect()),
        Err(cycle) => Err(StartupJobsError::DependsOnLoop(
            StartupJobsDependsOnLoopError {
                job_name: job_graph[cycle.node_id()],
            },
        )),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
