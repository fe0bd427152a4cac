use crate::infra::{InMemoryApplicationRepository, InMemoryJobRepository};
use clap::Args;
use jobboard::error::AppError;
use jobboard::moderation::{ForbiddenWords, StaticWordSource};
use jobboard::query::{ListParams, Paginated};
use jobboard::workflows::applications::{
    ApplicationRecord, ApplicationService, ApplicationStatus, ApplicationSubmission,
    JobSeekerId, JobSeekerProfile, UserAccount,
};
use jobboard::workflows::jobs::{EmployerId, JobDraft, JobService};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Employer id that posts the demo job
    #[arg(long, default_value = "emp-demo")]
    pub(crate) employer: String,
    /// Search term applied to the employer's application listing
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Page size used for the listings
    #[arg(long, default_value_t = 5)]
    pub(crate) per_page: u32,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        employer,
        search,
        per_page,
    } = args;
    let employer = EmployerId(employer);

    let moderation = Arc::new(ForbiddenWords::load(StaticWordSource::new([
        "scam", "bitcoin",
    ]))?);
    let jobs = Arc::new(InMemoryJobRepository::default());
    let job_service = JobService::new(jobs.clone(), moderation.clone());
    let service = ApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        jobs,
        moderation,
    );

    println!("Job board demo");
    let job = job_service.create(
        employer.clone(),
        JobDraft {
            title: "Senior Rust Engineer".to_string(),
            description: "Build the hiring pipeline".to_string(),
        },
    )?;
    println!("- Posted {} '{}' for {}", job.id, job.title, job.employer_id);

    let candidates = [
        ("js-ada", "Ada Lovelace", "Analytical engines are my thing."),
        ("js-grace", "Grace Hopper", "I wrote the first compiler."),
        ("js-mallory", "Mallory Mint", "Get rich quick with bitcoin!"),
    ];
    let mut accepted = Vec::new();
    for (id, name, letter) in candidates {
        let submission = ApplicationSubmission {
            job_id: job.id.clone(),
            job_seeker: JobSeekerProfile {
                id: JobSeekerId(id.to_string()),
                user: UserAccount {
                    full_name: name.to_string(),
                    email: format!("{id}@example.com"),
                },
            },
            cover_letter: letter.to_string(),
        };
        match service.submit(submission) {
            Ok(record) => {
                println!("- {} applied -> {} ({})", name, record.id, record.status());
                accepted.push(record);
            }
            Err(err) => println!("- {} rejected: {}", name, err),
        }
    }

    if let Some(first) = accepted.first() {
        println!("\nReview of {}", first.id);
        for requested in [
            ApplicationStatus::Accepted,
            ApplicationStatus::Reviewed,
            ApplicationStatus::Accepted,
            ApplicationStatus::Interview,
            ApplicationStatus::Rejected,
        ] {
            match service.update_status(&first.id, &employer, requested) {
                Ok(record) => println!("  -> {}", record.status()),
                Err(err) => println!("  x {}", err),
            }
        }
    }

    let mut params = ListParams::page(1, per_page);
    params.search = search;
    let employer_view = service.list_for_employer(&employer, &params)?;
    println!("\nApplications for {}", employer);
    render_listing(&employer_view);

    let open_jobs = job_service.list_active(&ListParams::default())?;
    println!(
        "\nOpen jobs: {} ({} page(s))",
        open_jobs.meta.total_items, open_jobs.meta.total_pages
    );

    job_service.close(&job.id, &employer)?;
    println!("- Closed {}; new applications are refused", job.id);

    Ok(())
}

fn render_listing(page: &Paginated<ApplicationRecord>) {
    println!(
        "  page {}/{} ({} total, {} per page)",
        page.meta.current_page, page.meta.total_pages, page.meta.total_items, page.meta.per_page
    );
    for record in &page.items {
        println!(
            "  - {} | {} | {} | applied {}",
            record.id,
            record.job_seeker.user.full_name,
            record.status(),
            record.applied_at.format("%Y-%m-%d %H:%M")
        );
    }
}
