//! Certification workflow
//!
//! Confirming a certification posts one move per certification line that
//! produces ledger lines. Cancelling removes the posted move, provided its
//! pending invoice line has not been reconciled yet.
//!
//! # Commit boundaries
//!
//! Confirmation saves the certification after every posted line. A failure on
//! a later line leaves the earlier moves posted and recorded.

use tracing::{info, instrument};

use core_kernel::{Clock, MoveId};
use domain_ledger::{Access, LedgerPort};

use crate::accounting::ProjectAccounting;
use crate::certification::{Certification, CertificationLine, CertificationState};
use crate::error::CertificationError;
use crate::ports::ProjectPort;
use crate::work::invoicing_root;

impl<L, P, C> ProjectAccounting<L, P, C>
where
    L: LedgerPort,
    P: ProjectPort,
    C: Clock,
{
    /// Confirms draft certifications and posts their moves
    ///
    /// Certifications whose work belongs to a manually invoiced project are
    /// confirmed without posting.
    ///
    /// Each producing line posts its own move, and `account_move` keeps only
    /// the last one. Cancelling therefore removes only that move: the moves of
    /// earlier lines stay posted and their pending lines are picked up by the
    /// next remainder settlement.
    ///
    /// # Errors
    ///
    /// - `CertificationError::InvalidStateTransition` if one is not a draft
    /// - `CertificationError::CyclicWorkHierarchy` if a work tree is cyclic
    /// - `CertificationError::ConfigurationMissing` if something has to be
    ///   posted and no clearing account is set
    #[instrument(skip(self, certifications), fields(count = certifications.len()))]
    pub fn confirm(&mut self, certifications: &mut [Certification]) -> Result<(), CertificationError> {
        for certification in certifications.iter() {
            certification.check_transition(CertificationState::Confirmed)?;
        }

        let mut auto_post = Vec::with_capacity(certifications.len());
        for certification in certifications.iter() {
            let work = self.projects.work(certification.work)?;
            let root = invoicing_root(&self.projects, &work)?;
            if root.invoice_method.is_manual() {
                info!(
                    certification_id = %certification.id,
                    root_id = %root.id,
                    "Project is invoiced manually, nothing posted"
                );
            }
            auto_post.push(!root.invoice_method.is_manual());
        }

        let posts_anything = certifications
            .iter()
            .zip(&auto_post)
            .any(|(certification, post)| *post && !certification.lines.is_empty());
        if posts_anything {
            self.config.pending_invoice_account()?;
        }

        for certification in certifications.iter_mut() {
            certification.transition(CertificationState::Confirmed)?;
            self.projects.save_certification(certification)?;
        }

        for (certification, post) in certifications.iter_mut().zip(auto_post) {
            if !post {
                continue;
            }

            let lines = certification.lines.clone();
            for line in &lines {
                if let Some(move_id) = self.post_certification_line(certification, line)? {
                    certification.account_move = Some(move_id);
                    self.projects.save_certification(certification)?;
                }
            }

            info!(
                certification_id = %certification.id,
                account_move = ?certification.account_move,
                "Certification confirmed"
            );
        }

        Ok(())
    }

    /// Saves and posts the move of one certification line
    ///
    /// The move is written with `Access::Trusted`; nothing else in the
    /// workflow is.
    fn post_certification_line(
        &mut self,
        certification: &Certification,
        line: &CertificationLine,
    ) -> Result<Option<MoveId>, CertificationError> {
        let entry = match self.certification_move(certification, line)? {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let move_id = self.ledger.save(entry, Access::Trusted)?;
        self.ledger.post(&[move_id], Access::Trusted)?;

        info!(
            certification_id = %certification.id,
            line_id = %line.id,
            move_id = %move_id,
            "Certification line posted"
        );
        Ok(Some(move_id))
    }

    /// Cancels certifications, deleting their unreconciled moves
    ///
    /// Certifications without a move are cancelled directly. The first
    /// certification whose move cannot be removed aborts the batch.
    ///
    /// # Errors
    ///
    /// - `CertificationError::ConfigurationMissing` if no clearing account is set
    /// - `CertificationError::AmbiguousClearingLine` if a move does not have
    ///   exactly one line on the clearing account
    /// - `CertificationError::ReconciledMoveConflict` if that line is reconciled
    #[instrument(skip(self, certifications), fields(count = certifications.len()))]
    pub fn cancel(&mut self, certifications: &mut [Certification]) -> Result<(), CertificationError> {
        let pending_account = self.config.pending_invoice_account()?;

        for certification in certifications.iter() {
            certification.check_transition(CertificationState::Cancelled)?;
        }

        for certification in certifications.iter_mut() {
            let move_id = match certification.account_move {
                Some(move_id) => move_id,
                None => continue,
            };

            let entry = self.ledger.get_move(move_id)?;
            let clearing: Vec<_> = entry.lines_on(pending_account).collect();
            let clearing_line = match clearing.as_slice() {
                [line] => *line,
                other => {
                    return Err(CertificationError::AmbiguousClearingLine {
                        move_name: entry.display_name(),
                        matches: other.len(),
                    })
                }
            };

            if clearing_line.is_reconciled() {
                return Err(CertificationError::ReconciledMoveConflict {
                    move_name: entry.display_name(),
                });
            }

            self.ledger.draft(&[move_id])?;
            self.ledger.delete(&[move_id])?;
            certification.account_move = None;
            self.projects.save_certification(certification)?;

            info!(
                certification_id = %certification.id,
                move_name = %entry.display_name(),
                "Certification move deleted"
            );
        }

        for certification in certifications.iter_mut() {
            certification.transition(CertificationState::Cancelled)?;
            self.projects.save_certification(certification)?;
        }

        Ok(())
    }
}
